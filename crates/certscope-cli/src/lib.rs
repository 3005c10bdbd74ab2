//! # certscope-cli
//!
//! Command-line front end for the `certscope` engine.
//!
//! ## Features
//!
//! - **Any encoding**: PEM, DER, bare Base64 or XML-wrapped Base64, from a file or stdin
//! - **Policy checks**: expiry, weak-key blocklist, self-signed, key size, weak hash
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
