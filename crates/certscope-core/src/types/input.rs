use serde::{Deserialize, Serialize};

/// Bytes handed to the engine, plus an optional display name.
///
/// The filename is only carried through to [`DecodedObject::source`](crate::DecodedObject)
/// for export naming; it never influences how the bytes are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    bytes: Vec<u8>,
    filename: Option<String>,
}

impl RawInput {
    /// Wrap a byte buffer of unknown encoding.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: None,
        }
    }

    /// Attach the name the bytes were loaded from.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// The raw buffer
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The declared filename, if any
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

/// What kind of object was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// X.509 certificate
    #[serde(rename = "certificate")]
    Certificate,
    /// PKCS#10 certificate signing request
    #[serde(rename = "csr")]
    CertificateSigningRequest,
}

impl ObjectKind {
    /// Returns true for certificates
    #[must_use]
    pub const fn is_certificate(self) -> bool {
        matches!(self, Self::Certificate)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Certificate => write!(f, "Certificate"),
            Self::CertificateSigningRequest => write!(f, "CSR"),
        }
    }
}

/// How the input was encoded when the sniffer accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    /// PEM armor (`-----BEGIN ...-----`)
    Pem,
    /// Bare Base64 without armor, possibly wrapped in XML tags
    Base64,
    /// Raw binary DER
    Der,
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pem => write!(f, "PEM"),
            Self::Base64 => write!(f, "Base64"),
            Self::Der => write!(f, "DER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_input_keeps_filename() {
        let raw = RawInput::new(b"abc".to_vec()).with_filename("server.crt");
        assert_eq!(raw.bytes(), b"abc");
        assert_eq!(raw.filename(), Some("server.crt"));
        assert_eq!(RawInput::new(Vec::new()).filename(), None);
    }

    #[test]
    fn kind_serializes_short_names() {
        assert_eq!(
            serde_json::to_string(&ObjectKind::CertificateSigningRequest).unwrap(),
            "\"csr\""
        );
        assert_eq!(ObjectKind::Certificate.to_string(), "Certificate");
    }
}
