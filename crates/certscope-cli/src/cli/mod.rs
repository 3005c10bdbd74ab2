//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    // CLI flag, then config file, then pretty
    let output_format = cli.output.or(config.output_format).unwrap_or_default();

    let ctx = commands::Context {
        output_format,
        verbose: cli.verbose,
        config,
    };

    match cli.command {
        Commands::Decode(args) => commands::decode::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}
