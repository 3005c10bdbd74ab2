//! Structural decoding of sniffed DER into an owned [`StructuredObject`].
//!
//! Parsing is delegated to `x509-parser`. Everything the extractors and the
//! policy battery need is copied out here, so no borrow of the input
//! survives the call.

mod algorithm;
mod extension;
mod key;

use chrono::{DateTime, Utc};
use tracing::trace;
use x509_parser::certificate::X509Certificate;
use x509_parser::certification_request::X509CertificationRequest;
use x509_parser::cri_attributes::ParsedCriAttribute;
use x509_parser::objects::{oid2sn, oid_registry};
use x509_parser::oid_registry::Oid;
use x509_parser::prelude::FromDer;
use x509_parser::time::ASN1Time;
use x509_parser::x509::X509Name;

use certscope_core::{ExtensionSummary, ObjectKind, Validity};

use crate::error::{DecodeError, Result};
use crate::sniff::Sniffed;

pub use algorithm::{HashAlgorithm, SignatureAlgorithm, SignatureScheme};
pub use key::{Curve, DsaKey, EcKey, NamedCurve, OtherKey, PublicKey, RsaKey};

/// Well-known DN attribute names.
const ATTRIBUTE_NAMES: &[(&str, &str)] = &[
    ("2.5.4.3", "commonName"),
    ("2.5.4.4", "surname"),
    ("2.5.4.5", "serialNumber"),
    ("2.5.4.6", "countryName"),
    ("2.5.4.7", "localityName"),
    ("2.5.4.8", "stateOrProvinceName"),
    ("2.5.4.9", "streetAddress"),
    ("2.5.4.10", "organizationName"),
    ("2.5.4.11", "organizationalUnitName"),
    ("2.5.4.12", "title"),
    ("2.5.4.15", "businessCategory"),
    ("2.5.4.17", "postalCode"),
    ("2.5.4.42", "givenName"),
    ("2.5.4.46", "dnQualifier"),
    ("2.5.4.65", "pseudonym"),
    ("2.5.4.97", "organizationIdentifier"),
    ("0.9.2342.19200300.100.1.1", "userID"),
    ("0.9.2342.19200300.100.1.25", "domainComponent"),
    ("1.2.840.113549.1.9.1", "emailAddress"),
    ("1.3.6.1.4.1.311.60.2.1.1", "jurisdictionLocalityName"),
    ("1.3.6.1.4.1.311.60.2.1.2", "jurisdictionStateOrProvinceName"),
    ("1.3.6.1.4.1.311.60.2.1.3", "jurisdictionCountryName"),
];

/// A subject or issuer name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedName {
    /// `(attribute name, value)` in RDN order, repeats included
    pub components: Vec<(String, String)>,
    /// DER of the whole `Name`, used for equality
    pub raw: Vec<u8>,
}

impl DistinguishedName {
    fn from_x509(name: &X509Name<'_>) -> Self {
        let components = name
            .iter()
            .flat_map(|rdn| rdn.iter())
            .map(|attr| {
                let oid = attr.attr_type();
                let key = attribute_name(oid);
                let value = attr.as_str().map_or_else(
                    |_| format!("#{}", hex::encode(attr.attr_value().data)),
                    str::to_string,
                );
                (key, value)
            })
            .collect();

        Self {
            components,
            raw: name.as_raw().to_vec(),
        }
    }
}

/// Owned view of a parsed certificate or CSR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredObject {
    pub kind: ObjectKind,
    /// DER the parser accepted
    pub der: Vec<u8>,
    pub subject: DistinguishedName,
    /// Certificate only
    pub issuer: Option<DistinguishedName>,
    pub public_key: PublicKey,
    pub signature_algorithm: SignatureAlgorithm,
    /// Raw serial integer bytes, certificate only
    pub serial: Option<Vec<u8>>,
    pub validity: Option<Validity>,
    /// `tbsCertificate` DER, certificate only
    pub tbs: Option<Vec<u8>>,
    pub signature: Vec<u8>,
    pub extensions: Vec<ExtensionSummary>,
}

impl StructuredObject {
    #[must_use]
    pub const fn is_certificate(&self) -> bool {
        self.kind.is_certificate()
    }
}

/// Decode the bytes the sniffer accepted.
///
/// # Errors
///
/// Returns `DecodeError::MalformedEncoding` when `x509-parser` rejects the
/// bytes for the sniffed kind.
pub fn decode(sniffed: &Sniffed) -> Result<StructuredObject> {
    trace!(kind = %sniffed.kind, len = sniffed.der.len(), "structural decode");
    match sniffed.kind {
        ObjectKind::Certificate => decode_certificate(&sniffed.der),
        ObjectKind::CertificateSigningRequest => decode_csr(&sniffed.der),
    }
}

fn decode_certificate(der: &[u8]) -> Result<StructuredObject> {
    let kind = ObjectKind::Certificate;
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| DecodeError::malformed(kind, e.to_string()))?;

    let validity = Validity {
        not_before: asn1_to_utc(cert.validity().not_before)
            .ok_or_else(|| DecodeError::malformed(kind, "notBefore out of range"))?,
        not_after: asn1_to_utc(cert.validity().not_after)
            .ok_or_else(|| DecodeError::malformed(kind, "notAfter out of range"))?,
    };

    Ok(StructuredObject {
        kind,
        der: der.to_vec(),
        subject: DistinguishedName::from_x509(cert.subject()),
        issuer: Some(DistinguishedName::from_x509(cert.issuer())),
        public_key: PublicKey::from_spki(cert.public_key()),
        signature_algorithm: SignatureAlgorithm::from_identifier(&cert.signature_algorithm),
        serial: Some(cert.raw_serial().to_vec()),
        validity: Some(validity),
        tbs: Some(cert.tbs_certificate.as_ref().to_vec()),
        signature: cert.signature_value.data.to_vec(),
        extensions: cert.extensions().iter().map(extension::summarize).collect(),
    })
}

fn decode_csr(der: &[u8]) -> Result<StructuredObject> {
    let kind = ObjectKind::CertificateSigningRequest;
    let (_, csr) = X509CertificationRequest::from_der(der)
        .map_err(|e| DecodeError::malformed(kind, e.to_string()))?;
    let info = &csr.certification_request_info;

    let extensions = info
        .iter_attributes()
        .filter_map(|attr| match attr.parsed_attribute() {
            ParsedCriAttribute::ExtensionRequest(request) => Some(&request.extensions),
            _ => None,
        })
        .flatten()
        .map(extension::summarize)
        .collect();

    Ok(StructuredObject {
        kind,
        der: der.to_vec(),
        subject: DistinguishedName::from_x509(&info.subject),
        issuer: None,
        public_key: PublicKey::from_spki(&info.subject_pki),
        signature_algorithm: SignatureAlgorithm::from_identifier(&csr.signature_algorithm),
        serial: None,
        validity: None,
        tbs: None,
        signature: csr.signature_value.data.to_vec(),
        extensions,
    })
}

/// Short name from the `oid-registry` database bundled with `x509-parser`.
pub(crate) fn registered_name(oid: &Oid<'_>) -> Option<String> {
    oid2sn(oid, oid_registry()).ok().map(str::to_string)
}

fn attribute_name(oid: &Oid<'_>) -> String {
    let dotted = oid.to_id_string();
    ATTRIBUTE_NAMES
        .iter()
        .find(|(known, _)| *known == dotted)
        .map(|(_, name)| (*name).to_string())
        .or_else(|| registered_name(oid))
        .unwrap_or(dotted)
}

fn asn1_to_utc(t: ASN1Time) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(t.timestamp(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use certscope_core::SourceEncoding;

    const SELF_SIGNED_DER: &[u8] = include_bytes!("../../tests/fixtures/rsa2048_selfsigned.der");
    const CSR_DER: &[u8] = include_bytes!("../../tests/fixtures/request.csr.der");

    fn sniffed(kind: ObjectKind, der: &[u8]) -> Sniffed {
        Sniffed {
            kind,
            encoding: SourceEncoding::Der,
            der: der.to_vec(),
        }
    }

    #[test]
    fn certificate_fields() {
        let obj = decode(&sniffed(ObjectKind::Certificate, SELF_SIGNED_DER)).unwrap();
        assert!(obj.is_certificate());
        assert_eq!(
            obj.subject.components.last(),
            Some(&("commonName".to_string(), "selfsigned.example.test".to_string()))
        );
        assert_eq!(obj.issuer.as_ref().map(|i| &i.raw), Some(&obj.subject.raw));
        assert!(matches!(obj.public_key, PublicKey::Rsa(_)));
        assert_eq!(obj.public_key.key_size(), Ok(2048));
        assert_eq!(obj.signature_algorithm.hash, Some(HashAlgorithm::Sha256));
        assert!(obj.tbs.is_some());
        assert!(obj.validity.is_some());
    }

    #[test]
    fn csr_fields() {
        let obj = decode(&sniffed(ObjectKind::CertificateSigningRequest, CSR_DER)).unwrap();
        assert!(!obj.is_certificate());
        assert!(obj.issuer.is_none());
        assert!(obj.serial.is_none());
        assert!(obj.tbs.is_none());
        assert!(obj
            .extensions
            .iter()
            .any(|ext| ext.oid == "2.5.29.17" && ext.value.contains("DNS:www.request.example.test")));
    }

    #[test]
    fn wrong_kind_is_malformed() {
        let err = decode(&sniffed(ObjectKind::CertificateSigningRequest, SELF_SIGNED_DER)).unwrap_err();
        assert!(err.is_malformed());
        let err = decode(&sniffed(ObjectKind::Certificate, b"\x30\x03\x02\x01\x01")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn attribute_names_fall_back_to_oid() {
        assert_eq!(attribute_name(&Oid::from(&[2, 5, 4, 3]).unwrap()), "commonName");
        assert_eq!(
            attribute_name(&Oid::from(&[1, 2, 840, 113_549, 1, 9, 1]).unwrap()),
            "emailAddress"
        );
        assert_eq!(attribute_name(&Oid::from(&[1, 2, 3, 99_999]).unwrap()), "1.2.3.99999");
    }
}
