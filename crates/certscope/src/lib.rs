//! # certscope
//!
//! Certificate and CSR decode & validation engine.
//!
//! Hand it bytes of unknown encoding (PEM, DER, bare Base64, Base64 wrapped
//! in XML tags) and it works out whether they hold an X.509 certificate or
//! a certificate signing request, pulls out identity, key and signature
//! details, and runs a fixed battery of policy checks.
//!
//! ## Data Flow
//!
//! ```text
//! RawInput
//!   -> sniff()              kind + encoding + DER      (UnrecognizedFormat)
//!   -> structure::decode()  StructuredObject           (MalformedEncoding)
//!   -> extract::*           display values, never fail
//!   -> PolicyBattery::run() Expiry, Debian Weak Key, Self-Signed, Key Size, MD5/SHA1
//!   -> DecodedObject
//! ```
//!
//! Only the two [`DecodeError`] variants ever leave the engine. Everything
//! that goes wrong after structural decoding is reported as data: a `-`
//! field or an `Unknown`/`Skipped` check.
//!
//! ```no_run
//! use certscope::{decode_and_validate, RawInput};
//!
//! let pem = std::fs::read("server.pem")?;
//! let decoded = decode_and_validate(&RawInput::new(pem))?;
//! println!("{} ({})", decoded.subject_dn, decoded.public_key_summary.describe());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod checks;
pub mod engine;
pub mod error;
pub mod extract;
pub mod hash;
pub mod sniff;
pub mod structure;
pub mod verify;

pub use certscope_core::*;
pub use checks::{BlocklistConfig, PolicyBattery, PolicyConfig};
pub use engine::{Engine, EngineConfig};
pub use error::{KeyError, VerifyError};

/// Decode and validate `raw` with the default configuration.
///
/// # Errors
///
/// Returns `DecodeError` when the input is not a recognisable certificate
/// or CSR.
pub fn decode_and_validate(raw: &RawInput) -> Result<DecodedObject> {
    Engine::default().decode_and_validate(raw)
}
