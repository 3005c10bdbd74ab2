//! certscope - inspect certificates and CSRs from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    certscope_cli::run().await
}
