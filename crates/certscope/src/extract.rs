//! Field extractors: pure transforms from a [`StructuredObject`] to the
//! display values of a [`DecodedObject`](certscope_core::DecodedObject).
//!
//! None of these fail. Anything that cannot be computed becomes
//! [`SENTINEL`].

use certscope_core::{ExtensionSummary, NameMap, PublicKeySummary, Validity, SENTINEL};
use tracing::debug;

use crate::hash::sha1_thumbprint;
use crate::structure::{DistinguishedName, PublicKey, StructuredObject};

/// `attr=value, attr=value` in RDN order, or [`SENTINEL`] for an empty name.
#[must_use]
pub fn format_name(name: &DistinguishedName) -> String {
    if name.components.is_empty() {
        return SENTINEL.to_string();
    }
    name.components
        .iter()
        .map(|(attr, value)| format!("{attr}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered attribute map; the first occurrence of a repeated attribute wins.
#[must_use]
pub fn name_map(name: &DistinguishedName) -> NameMap {
    let mut map = NameMap::new();
    for (attr, value) in &name.components {
        map.entry(attr.clone()).or_insert_with(|| value.clone());
    }
    map
}

#[must_use]
pub fn public_key_summary(key: &PublicKey) -> PublicKeySummary {
    let size_or_curve = match key.key_size() {
        Ok(bits) => bits.to_string(),
        Err(e) => {
            debug!(error = %e, "key size unavailable");
            SENTINEL.to_string()
        }
    };

    let algorithm = match key {
        PublicKey::Ec(ec) => format!("EC ({})", ec.curve.name().unwrap_or(SENTINEL)),
        PublicKey::Rsa(_) | PublicKey::Dsa(_) | PublicKey::Other(_) => {
            key.algorithm_name().to_string()
        }
    };

    PublicKeySummary {
        algorithm,
        size_or_curve,
    }
}

/// `<algorithm> (<hash>)`, whichever side resolves, or `-`.
#[must_use]
pub fn signature_summary(obj: &StructuredObject) -> String {
    let alg = &obj.signature_algorithm;
    match (alg.name.as_deref(), alg.hash) {
        (Some(name), Some(hash)) => format!("{name} ({hash})"),
        (Some(name), None) => name.to_string(),
        (None, Some(hash)) => hash.name().to_string(),
        (None, None) => SENTINEL.to_string(),
    }
}

/// SHA-1 thumbprint of a certificate, `None` for a CSR.
#[must_use]
pub fn thumbprint(obj: &StructuredObject) -> Option<String> {
    if !obj.is_certificate() {
        return None;
    }
    if obj.der.is_empty() {
        return Some(SENTINEL.to_string());
    }
    Some(sha1_thumbprint(&obj.der))
}

/// `0x` + upper-case hex without leading zero bytes (`0x0` for zero).
#[must_use]
pub fn serial_hex(serial: &[u8]) -> String {
    let significant = serial
        .iter()
        .position(|&b| b != 0)
        .map_or(&[][..], |start| &serial[start..]);

    if significant.is_empty() {
        return "0x0".to_string();
    }
    let hex = hex::encode_upper(significant);
    format!("0x{}", hex.trim_start_matches('0'))
}

#[must_use]
pub const fn validity(obj: &StructuredObject) -> Option<Validity> {
    obj.validity
}

#[must_use]
pub fn extension_summaries(obj: &StructuredObject) -> Vec<ExtensionSummary> {
    obj.extensions.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Curve, EcKey, NamedCurve, OtherKey, RsaKey};

    fn dn(parts: &[(&str, &str)]) -> DistinguishedName {
        DistinguishedName {
            components: parts
                .iter()
                .map(|(a, v)| ((*a).to_string(), (*v).to_string()))
                .collect(),
            raw: Vec::new(),
        }
    }

    #[test]
    fn name_keeps_rdn_order() {
        let name = dn(&[
            ("organizationalUnitName", "PKI"),
            ("commonName", "b.example"),
            ("organizationalUnitName", "Ops"),
        ]);
        assert_eq!(
            format_name(&name),
            "organizationalUnitName=PKI, commonName=b.example, organizationalUnitName=Ops"
        );

        let map = name_map(&name);
        assert_eq!(map.len(), 2);
        assert_eq!(map["organizationalUnitName"], "PKI");
        assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some("organizationalUnitName"));
    }

    #[test]
    fn empty_name_is_sentinel() {
        let empty = dn(&[]);
        assert_eq!(format_name(&empty), SENTINEL);
        assert!(name_map(&empty).is_empty());
    }

    #[test]
    fn serial_formatting() {
        assert_eq!(serial_hex(&[0x00, 0x1A, 0x2B]), "0x1A2B");
        assert_eq!(serial_hex(&[0x01]), "0x1");
        assert_eq!(serial_hex(&[0x00]), "0x0");
        assert_eq!(serial_hex(&[]), "0x0");
        assert_eq!(serial_hex(&[0x0F, 0x00]), "0xF00");
    }

    #[test]
    fn key_summaries() {
        let ec = PublicKey::Ec(EcKey {
            curve: Curve::Named(NamedCurve::Secp256r1),
            point: Vec::new(),
        });
        let summary = public_key_summary(&ec);
        assert_eq!(summary.algorithm, "EC (secp256r1)");
        assert_eq!(summary.size_or_curve, "256");

        let broken_rsa = public_key_summary(&PublicKey::Rsa(RsaKey::default()));
        assert_eq!(broken_rsa.algorithm, "RSA");
        assert_eq!(broken_rsa.size_or_curve, SENTINEL);

        let ed = public_key_summary(&PublicKey::Other(OtherKey {
            oid: "1.3.101.112".into(),
            name: "Ed25519".into(),
        }));
        assert_eq!(ed.algorithm, "Ed25519");
        assert_eq!(ed.size_or_curve, SENTINEL);
    }
}
