use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::check::CheckResult;
use super::input::{ObjectKind, SourceEncoding};

/// Placeholder for values that could not be computed or do not apply.
pub const SENTINEL: &str = "-";

/// Distinguished-name attributes in RDN order.
///
/// Keys are attribute short names (`commonName`, `organizationName`, ...)
/// or the dotted OID for unregistered attributes. The first occurrence of
/// a repeated attribute wins; the full sequence is kept in the formatted
/// DN string.
pub type NameMap = IndexMap<String, String>;

/// Public key algorithm and size, display-ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeySummary {
    /// `RSA`, `DSA`, `EC (<curve>)` or the key type's tag name
    pub algorithm: String,
    /// Bit size as a decimal string, or `-`
    pub size_or_curve: String,
}

impl PublicKeySummary {
    /// One-line description, e.g. `RSA 2048 bits` or `EC (secp256r1) 256 bits`.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.size_or_curve == SENTINEL {
            self.algorithm.clone()
        } else {
            format!("{} {} bits", self.algorithm, self.size_or_curve)
        }
    }
}

/// Certificate validity window, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

/// One X.509v3 extension, reduced to strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSummary {
    /// Dotted OID
    pub oid: String,
    /// Registered short name, or the OID again
    pub name: String,
    pub critical: bool,
    /// Best-effort rendering of the value (hex for unknown extensions)
    pub value: String,
}

/// Complete result of one decode. Immutable, owns all of its data.
///
/// `issuer`, `issuer_dn`, `serial_number_hex`, `thumbprint_sha1_hex` and
/// `validity` are `Some` exactly when `kind` is [`ObjectKind::Certificate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedObject {
    /// Filename from the [`RawInput`](crate::RawInput), if one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub kind: ObjectKind,
    pub encoding: SourceEncoding,
    pub subject: NameMap,
    /// Subject rendered as `attr=value, attr=value`
    pub subject_dn: String,
    pub issuer: Option<NameMap>,
    pub issuer_dn: Option<String>,
    pub public_key_summary: PublicKeySummary,
    /// `<algorithm> (<hash>)`, one side alone, or `-`
    pub signature_summary: String,
    pub serial_number_hex: Option<String>,
    /// Upper-case SHA-1 of the certificate DER, `-` if it could not be computed
    pub thumbprint_sha1_hex: Option<String>,
    pub validity: Option<Validity>,
    #[serde(default)]
    pub extensions: Vec<ExtensionSummary>,
    pub checks: Vec<CheckResult>,
}

impl DecodedObject {
    /// Returns true if this is a certificate
    #[must_use]
    pub const fn is_certificate(&self) -> bool {
        self.kind.is_certificate()
    }

    /// Flat "properties" view used by tabular exporters.
    ///
    /// Keys are fixed and always present; certificate-only values are `-`
    /// for a CSR.
    #[must_use]
    pub fn properties(&self) -> IndexMap<&'static str, String> {
        let dash = || SENTINEL.to_string();
        let mut props = IndexMap::new();

        props.insert("Subject", self.subject_dn.clone());
        props.insert("Issuer", self.issuer_dn.clone().unwrap_or_else(dash));
        props.insert(
            "Valid From",
            self.validity
                .map_or_else(dash, |v| v.not_before.to_rfc3339()),
        );
        props.insert(
            "Valid To",
            self.validity.map_or_else(dash, |v| v.not_after.to_rfc3339()),
        );
        props.insert("Key Size", self.public_key_summary.size_or_curve.clone());
        props.insert("Key Algorithm", self.public_key_summary.algorithm.clone());
        props.insert("Sig. Algorithm", self.signature_summary.clone());
        props.insert(
            "Serial Number",
            self.serial_number_hex.clone().unwrap_or_else(dash),
        );
        props.insert(
            "Thumbprint",
            self.thumbprint_sha1_hex.clone().unwrap_or_else(dash),
        );

        props
    }
}
