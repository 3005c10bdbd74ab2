//! Public key handles.

use dsa::pkcs8::DecodePublicKey;
use x509_parser::public_key::PublicKey as ParsedPublicKey;
use x509_parser::x509::SubjectPublicKeyInfo;

use super::registered_name;
use crate::error::KeyError;

const OID_RSA: &str = "1.2.840.113549.1.1.1";
const OID_RSASSA_PSS: &str = "1.2.840.113549.1.1.10";
const OID_DSA: &str = "1.2.840.10040.4.1";
const OID_EC: &str = "1.2.840.10045.2.1";

/// Subject public key, one variant per family the engine knows how to size
/// and verify with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RsaKey),
    Dsa(DsaKey),
    Ec(EcKey),
    Other(OtherKey),
}

/// RSA modulus and public exponent, big-endian.
///
/// Both are empty when the key bytes could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsaKey {
    pub modulus: Vec<u8>,
    pub exponent: Vec<u8>,
}

/// DSA keys keep the whole SPKI; the domain parameters live in the
/// algorithm identifier, not in the bit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaKey {
    pub spki_der: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcKey {
    pub curve: Curve,
    /// SEC1 encoded point
    pub point: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherKey {
    pub oid: String,
    /// Key type tag (`Ed25519`, registry short name, or the OID)
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    Secp192r1,
    Secp224r1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
    Secp256k1,
    BrainpoolP256r1,
    BrainpoolP384r1,
    BrainpoolP512r1,
}

const NAMED_CURVES: &[(&str, NamedCurve)] = &[
    ("1.2.840.10045.3.1.1", NamedCurve::Secp192r1),
    ("1.3.132.0.33", NamedCurve::Secp224r1),
    ("1.2.840.10045.3.1.7", NamedCurve::Secp256r1),
    ("1.3.132.0.34", NamedCurve::Secp384r1),
    ("1.3.132.0.35", NamedCurve::Secp521r1),
    ("1.3.132.0.10", NamedCurve::Secp256k1),
    ("1.3.36.3.3.2.8.1.1.7", NamedCurve::BrainpoolP256r1),
    ("1.3.36.3.3.2.8.1.1.11", NamedCurve::BrainpoolP384r1),
    ("1.3.36.3.3.2.8.1.1.13", NamedCurve::BrainpoolP512r1),
];

impl NamedCurve {
    #[must_use]
    pub fn from_oid(oid: &str) -> Option<Self> {
        NAMED_CURVES
            .iter()
            .find(|(known, _)| *known == oid)
            .map(|&(_, curve)| curve)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Secp192r1 => "secp192r1",
            Self::Secp224r1 => "secp224r1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
            Self::Secp256k1 => "secp256k1",
            Self::BrainpoolP256r1 => "brainpoolP256r1",
            Self::BrainpoolP384r1 => "brainpoolP384r1",
            Self::BrainpoolP512r1 => "brainpoolP512r1",
        }
    }

    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::Secp192r1 => 192,
            Self::Secp224r1 => 224,
            Self::Secp256r1 | Self::Secp256k1 | Self::BrainpoolP256r1 => 256,
            Self::Secp384r1 | Self::BrainpoolP384r1 => 384,
            Self::Secp521r1 => 521,
            Self::BrainpoolP512r1 => 512,
        }
    }
}

/// EC domain parameters as found in the SPKI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Curve {
    Named(NamedCurve),
    /// Unrecognised named curve (dotted OID)
    Unknown(String),
    /// Explicit or missing parameters
    Unspecified,
}

impl Curve {
    fn from_parameters(oid: Option<String>) -> Self {
        match oid {
            Some(oid) => NamedCurve::from_oid(&oid).map_or(Self::Unknown(oid), Self::Named),
            None => Self::Unspecified,
        }
    }

    /// Display name, `None` for explicit parameters.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(curve) => Some(curve.name()),
            Self::Unknown(oid) => Some(oid),
            Self::Unspecified => None,
        }
    }
}

impl PublicKey {
    /// Classify the subject public key info of a certificate or CSR.
    pub(crate) fn from_spki(spki: &SubjectPublicKeyInfo<'_>) -> Self {
        let oid = spki.algorithm.algorithm.to_id_string();

        match oid.as_str() {
            OID_RSA | OID_RSASSA_PSS => match spki.parsed() {
                Ok(ParsedPublicKey::RSA(rsa)) => Self::Rsa(RsaKey {
                    modulus: rsa.modulus.to_vec(),
                    exponent: rsa.exponent.to_vec(),
                }),
                _ => Self::Rsa(RsaKey::default()),
            },
            OID_DSA => Self::Dsa(DsaKey {
                spki_der: spki.raw.to_vec(),
            }),
            OID_EC => {
                let curve_oid = spki
                    .algorithm
                    .parameters
                    .as_ref()
                    .and_then(|params| params.as_oid().ok())
                    .map(|curve| curve.to_id_string());
                Self::Ec(EcKey {
                    curve: Curve::from_parameters(curve_oid),
                    point: spki.subject_public_key.data.to_vec(),
                })
            }
            _ => Self::Other(OtherKey {
                name: other_key_name(&oid)
                    .map(str::to_string)
                    .or_else(|| registered_name(&spki.algorithm.algorithm))
                    .unwrap_or_else(|| oid.clone()),
                oid,
            }),
        }
    }

    /// Family tag as shown in summaries (`RSA`, `DSA`, `EC`, ...).
    #[must_use]
    pub fn algorithm_name(&self) -> &str {
        match self {
            Self::Rsa(_) => "RSA",
            Self::Dsa(_) => "DSA",
            Self::Ec(_) => "EC",
            Self::Other(other) => &other.name,
        }
    }

    /// Key size in bits.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` when the key material cannot be decoded or the
    /// size of an EC key cannot be derived.
    pub fn key_size(&self) -> Result<usize, KeyError> {
        match self {
            Self::Rsa(rsa) => rsa_bits(&rsa.modulus).ok_or_else(|| KeyError::Undecodable {
                algorithm: "RSA",
                reason: "empty modulus".to_string(),
            }),
            Self::Dsa(dsa) => {
                let key = dsa::VerifyingKey::from_public_key_der(&dsa.spki_der).map_err(|e| {
                    KeyError::Undecodable {
                        algorithm: "DSA",
                        reason: e.to_string(),
                    }
                })?;
                Ok(key.components().p().bits())
            }
            Self::Ec(ec) => match &ec.curve {
                Curve::Named(curve) => Ok(curve.bits()),
                Curve::Unknown(_) | Curve::Unspecified => {
                    point_bits(&ec.point).ok_or(KeyError::UnknownCurve)
                }
            },
            Self::Other(other) => Err(KeyError::Undecodable {
                algorithm: "unknown",
                reason: format!("no size for key type {}", other.name),
            }),
        }
    }
}

fn other_key_name(oid: &str) -> Option<&'static str> {
    match oid {
        "1.3.101.110" => Some("X25519"),
        "1.3.101.111" => Some("X448"),
        "1.3.101.112" => Some("Ed25519"),
        "1.3.101.113" => Some("Ed448"),
        _ => None,
    }
}

/// Bit length of a big-endian integer, ignoring leading zero bytes.
pub(crate) fn rsa_bits(modulus: &[u8]) -> Option<usize> {
    let start = modulus.iter().position(|&b| b != 0)?;
    let significant = &modulus[start..];
    let lead = significant[0].leading_zeros() as usize;
    Some(significant.len() * 8 - lead)
}

/// Field size from an uncompressed SEC1 point (`04 || X || Y`).
fn point_bits(point: &[u8]) -> Option<usize> {
    match point.split_first() {
        Some((0x04, coords)) if !coords.is_empty() && coords.len() % 2 == 0 => {
            Some(coords.len() / 2 * 8)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsa_bits_skip_leading_zero() {
        let mut modulus = vec![0x00, 0xC0];
        modulus.extend([0xFF; 255]);
        assert_eq!(rsa_bits(&modulus), Some(2048));
        assert_eq!(rsa_bits(&[0x01]), Some(1));
        assert_eq!(rsa_bits(&[]), None);
        assert_eq!(rsa_bits(&[0, 0]), None);
    }

    #[test]
    fn empty_rsa_key_has_no_size() {
        let key = PublicKey::Rsa(RsaKey::default());
        assert!(matches!(
            key.key_size(),
            Err(KeyError::Undecodable { algorithm: "RSA", .. })
        ));
    }

    #[test]
    fn unknown_curve_sized_from_point() {
        let mut point = vec![0x04];
        point.extend([0xAB; 64]);
        let key = PublicKey::Ec(EcKey {
            curve: Curve::Unknown("1.2.3.4".into()),
            point,
        });
        assert_eq!(key.key_size(), Ok(256));

        let compressed = PublicKey::Ec(EcKey {
            curve: Curve::Unspecified,
            point: vec![0x02; 33],
        });
        assert_eq!(compressed.key_size(), Err(KeyError::UnknownCurve));
    }

    #[test]
    fn named_curves() {
        assert_eq!(
            NamedCurve::from_oid("1.3.132.0.34"),
            Some(NamedCurve::Secp384r1)
        );
        assert_eq!(NamedCurve::Secp521r1.bits(), 521);
        assert_eq!(Curve::Unknown("1.2.3".into()).name(), Some("1.2.3"));
        assert_eq!(Curve::Unspecified.name(), None);
    }

    #[test]
    fn other_key_names() {
        assert_eq!(other_key_name("1.3.101.112"), Some("Ed25519"));
        assert_eq!(other_key_name("1.2.3"), None);
    }
}
