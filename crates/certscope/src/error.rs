//! Internal errors. None of these cross the engine boundary: the check
//! battery turns them into [`CheckResult`](certscope_core::CheckResult)
//! messages and details.

use thiserror::Error;

pub use certscope_core::{DecodeError, Result};

/// Public key introspection failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key bytes could not be decoded
    #[error("{algorithm} public key could not be decoded: {reason}")]
    Undecodable {
        algorithm: &'static str,
        reason: String,
    },

    /// Curve neither named nor derivable from the point encoding
    #[error("EC curve size could not be determined")]
    UnknownCurve,
}

/// Self-signature verification failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Key type has no verification primitive
    #[error("unknown key type {0} (cannot verify)")]
    UnsupportedKey(String),

    /// Signature/hash/curve combination has no verification primitive
    #[error("unsupported signature algorithm {0}")]
    UnsupportedAlgorithm(String),

    /// Hash could not be resolved from the signature algorithm
    #[error("signature hash algorithm could not be determined")]
    UnknownHash,

    /// Object carries no to-be-signed bytes (CSR)
    #[error("no signed data to verify")]
    MissingSignedData,

    /// Key material rejected by the crypto backend
    #[error("invalid public key: {0}")]
    InvalidKey(String),

    /// Signature is malformed or does not match
    #[error("signature mismatch")]
    BadSignature,
}

impl From<KeyError> for VerifyError {
    fn from(e: KeyError) -> Self {
        Self::InvalidKey(e.to_string())
    }
}
