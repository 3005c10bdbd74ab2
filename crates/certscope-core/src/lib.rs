//! Core types for the certscope certificate/CSR decoder.
//!
//! This crate holds the value types handed from the decode engine to its
//! collaborators (exporters, renderers):
//!
//! - **Types**: [`RawInput`], [`DecodedObject`], [`CheckResult`] and friends
//! - **Errors**: the two engine-level failures in [`DecodeError`]
//!
//! Nothing here parses ASN.1; see the `certscope` crate for that.
//!
//! # Example
//!
//! ```rust,ignore
//! use certscope_core::{CheckLevel, DecodedObject};
//!
//! fn failed_checks(obj: &DecodedObject) -> usize {
//!     obj.checks.iter().filter(|c| c.status.level() == CheckLevel::Fail).count()
//! }
//! ```

mod error;
pub mod types;

pub use error::{DecodeError, Result};
pub use types::*;
