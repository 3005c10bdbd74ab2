//! Tracing subscriber setup.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `debug` with `--verbose`, `warn`
/// without.
pub fn init(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    // A second init (tests calling `run` twice) is harmless.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
