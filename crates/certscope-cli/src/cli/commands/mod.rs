//! Command implementations.

pub mod config;
pub mod decode;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output (adds check details)
    pub verbose: bool,

    /// Loaded configuration file
    pub config: Config,
}
