//! `certscope decode` - decode a certificate or CSR and run the checks.

use anyhow::{Context as _, Result};
use certscope::{BlocklistConfig, Engine, EngineConfig, PolicyConfig, RawInput};
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::Context;
use crate::cli::args::DecodeArgs;
use crate::config::Config;
use crate::output;

pub async fn execute(ctx: Context, args: DecodeArgs) -> Result<()> {
    let raw = read_input(&args.input).await?;
    let engine = Engine::new(engine_config(&ctx.config, &args));

    let decoded = match args.at {
        Some(at) => engine.decode_and_validate_at(&raw, at),
        None => engine.decode_and_validate(&raw),
    }
    .with_context(|| format!("cannot decode {}", args.input))?;

    let rendered = output::render(&decoded, ctx.output_format, ctx.verbose)?;
    print!("{rendered}");

    Ok(())
}

async fn read_input(input: &str) -> Result<RawInput> {
    if input == "-" {
        let mut bytes = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut bytes)
            .await
            .context("failed to read stdin")?;
        debug!(len = bytes.len(), "read stdin");
        return Ok(RawInput::new(bytes));
    }

    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("failed to read {input}"))?;
    debug!(path = input, len = bytes.len(), "read input file");
    Ok(RawInput::new(bytes).with_filename(input))
}

/// Flags override the config file, which overrides the engine defaults.
fn engine_config(config: &Config, args: &DecodeArgs) -> EngineConfig {
    let mut policy = PolicyConfig::default();

    if let Some(dir) = args.badkeys_dir.clone().or_else(|| config.badkeys_dir.clone()) {
        policy.blocklist = BlocklistConfig {
            override_path: Some(dir),
            ..BlocklistConfig::default()
        };
    }
    if let Some(days) = args.expiry_warning_days.or(config.expiry_warning_days) {
        policy.expiry_warning_days = days;
    }

    EngineConfig { policy }
}
