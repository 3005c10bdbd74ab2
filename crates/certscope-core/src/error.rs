use thiserror::Error;

use crate::types::ObjectKind;

/// Result type alias for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors that can cross the decode engine boundary.
///
/// Everything else (key size introspection, signature verification,
/// thumbprints) degrades to data inside the [`DecodedObject`](crate::DecodedObject).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No sniffing branch accepted the input
    #[error("not a valid PEM/DER certificate or CSR")]
    UnrecognizedFormat,

    /// The input was classified but the X.509 parser rejected it
    #[error("malformed {kind} encoding: {reason}")]
    MalformedEncoding {
        /// What the sniffer classified the input as
        kind: ObjectKind,
        /// Message from the underlying parser
        reason: String,
    },
}

impl DecodeError {
    /// Build a `MalformedEncoding` error from any displayable parser error.
    pub fn malformed(kind: ObjectKind, reason: impl std::fmt::Display) -> Self {
        Self::MalformedEncoding {
            kind,
            reason: reason.to_string(),
        }
    }

    /// Returns true if no format matched the input
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnrecognizedFormat)
    }

    /// Returns true if the input was classified but could not be decoded
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedEncoding { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_message_is_user_facing() {
        assert_eq!(
            DecodeError::UnrecognizedFormat.to_string(),
            "not a valid PEM/DER certificate or CSR"
        );
    }

    #[test]
    fn malformed_carries_parser_message() {
        let err = DecodeError::malformed(ObjectKind::CertificateSigningRequest, "unexpected EOF");
        assert!(err.is_malformed());
        assert!(!err.is_unrecognized());
        assert_eq!(err.to_string(), "malformed CSR encoding: unexpected EOF");
    }
}
