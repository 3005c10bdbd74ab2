//! Command-line argument definitions using clap.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Inspect X.509 certificates and certificate signing requests
///
/// Accepts PEM, DER, bare Base64 (with or without padding) and Base64
/// wrapped in XML tags. Runs expiry, weak-key, self-signed, key size and
/// weak hash checks.
#[derive(Parser, Debug)]
#[command(name = "certscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a certificate or CSR and run the policy checks
    Decode(DecodeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Decode command
// ============================================================================

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File to read, or `-` for stdin
    pub input: String,

    /// Evaluate expiry at this instant instead of now (RFC 3339)
    #[arg(long, value_name = "RFC3339")]
    pub at: Option<DateTime<Utc>>,

    /// Weak-key blocklist location, probed before the system paths
    #[arg(long, env = "CERTSCOPE_BADKEYS_DIR", value_name = "PATH")]
    pub badkeys_dir: Option<PathBuf>,

    /// Warn when the certificate expires within this many days
    #[arg(long, value_name = "DAYS")]
    pub expiry_warning_days: Option<i64>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (output_format, badkeys_dir, expiry_warning_days)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}
