//! Signature and hash algorithm identification.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use x509_parser::signature_algorithm::SignatureAlgorithm as ParsedSignatureAlgorithm;
use x509_parser::x509::AlgorithmIdentifier;

use super::registered_name;

/// Digest used by a signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Lower-case name (`md5`, `sha1`, `sha256`, ...)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Resolve a digest algorithm OID (dotted form).
    #[must_use]
    pub fn from_oid(oid: &str) -> Option<Self> {
        match oid {
            "1.2.840.113549.2.5" => Some(Self::Md5),
            "1.3.14.3.2.26" => Some(Self::Sha1),
            "2.16.840.1.101.3.4.2.4" => Some(Self::Sha224),
            "2.16.840.1.101.3.4.2.1" => Some(Self::Sha256),
            "2.16.840.1.101.3.4.2.2" => Some(Self::Sha384),
            "2.16.840.1.101.3.4.2.3" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Hash `data` with this algorithm.
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5 => Md5::digest(data).to_vec(),
            Self::Sha1 => Sha1::digest(data).to_vec(),
            Self::Sha224 => Sha224::digest(data).to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Signature family, independent of the key actually embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    RsaPkcs1,
    RsaPss,
    Ecdsa,
    Dsa,
    EdDsa,
    Unknown,
}

/// Parsed `signatureAlgorithm` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureAlgorithm {
    /// Dotted OID
    pub oid: String,
    /// Conventional name, `None` when the OID is not registered anywhere
    pub name: Option<String>,
    pub scheme: SignatureScheme,
    pub hash: Option<HashAlgorithm>,
}

/// (oid, name, scheme, hash)
type KnownAlgorithm = (&'static str, &'static str, SignatureScheme, Option<HashAlgorithm>);

const KNOWN_ALGORITHMS: &[KnownAlgorithm] = &[
    ("1.2.840.113549.1.1.4", "md5WithRSAEncryption", SignatureScheme::RsaPkcs1, Some(HashAlgorithm::Md5)),
    ("1.2.840.113549.1.1.5", "sha1WithRSAEncryption", SignatureScheme::RsaPkcs1, Some(HashAlgorithm::Sha1)),
    ("1.3.14.3.2.29", "sha1WithRSA", SignatureScheme::RsaPkcs1, Some(HashAlgorithm::Sha1)),
    ("1.2.840.113549.1.1.14", "sha224WithRSAEncryption", SignatureScheme::RsaPkcs1, Some(HashAlgorithm::Sha224)),
    ("1.2.840.113549.1.1.11", "sha256WithRSAEncryption", SignatureScheme::RsaPkcs1, Some(HashAlgorithm::Sha256)),
    ("1.2.840.113549.1.1.12", "sha384WithRSAEncryption", SignatureScheme::RsaPkcs1, Some(HashAlgorithm::Sha384)),
    ("1.2.840.113549.1.1.13", "sha512WithRSAEncryption", SignatureScheme::RsaPkcs1, Some(HashAlgorithm::Sha512)),
    ("1.2.840.113549.1.1.10", "RSASSA-PSS", SignatureScheme::RsaPss, None),
    ("1.2.840.10045.4.1", "ecdsa-with-SHA1", SignatureScheme::Ecdsa, Some(HashAlgorithm::Sha1)),
    ("1.2.840.10045.4.3.1", "ecdsa-with-SHA224", SignatureScheme::Ecdsa, Some(HashAlgorithm::Sha224)),
    ("1.2.840.10045.4.3.2", "ecdsa-with-SHA256", SignatureScheme::Ecdsa, Some(HashAlgorithm::Sha256)),
    ("1.2.840.10045.4.3.3", "ecdsa-with-SHA384", SignatureScheme::Ecdsa, Some(HashAlgorithm::Sha384)),
    ("1.2.840.10045.4.3.4", "ecdsa-with-SHA512", SignatureScheme::Ecdsa, Some(HashAlgorithm::Sha512)),
    ("1.2.840.10040.4.3", "dsa-with-sha1", SignatureScheme::Dsa, Some(HashAlgorithm::Sha1)),
    ("2.16.840.1.101.3.4.3.1", "dsa-with-sha224", SignatureScheme::Dsa, Some(HashAlgorithm::Sha224)),
    ("2.16.840.1.101.3.4.3.2", "dsa-with-sha256", SignatureScheme::Dsa, Some(HashAlgorithm::Sha256)),
    ("1.3.101.112", "ed25519", SignatureScheme::EdDsa, None),
    ("1.3.101.113", "ed448", SignatureScheme::EdDsa, None),
];

impl SignatureAlgorithm {
    /// Identify the algorithm of a certificate or CSR signature.
    pub fn from_identifier(alg: &AlgorithmIdentifier<'_>) -> Self {
        let oid = alg.algorithm.to_id_string();

        let Some(&(_, name, scheme, hash)) =
            KNOWN_ALGORITHMS.iter().find(|(known, ..)| *known == oid)
        else {
            return Self {
                name: registered_name(&alg.algorithm),
                oid,
                scheme: SignatureScheme::Unknown,
                hash: None,
            };
        };

        let hash = match scheme {
            SignatureScheme::RsaPss => pss_hash(alg),
            _ => hash,
        };

        Self {
            oid,
            name: Some(name.to_string()),
            scheme,
            hash,
        }
    }
}

/// RSASSA-PSS carries its digest in the algorithm parameters.
fn pss_hash(alg: &AlgorithmIdentifier<'_>) -> Option<HashAlgorithm> {
    match ParsedSignatureAlgorithm::try_from(alg) {
        Ok(ParsedSignatureAlgorithm::RSASSA_PSS(params)) => {
            HashAlgorithm::from_oid(&params.hash_algorithm_oid().to_id_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_oids_resolve() {
        assert_eq!(
            HashAlgorithm::from_oid("2.16.840.1.101.3.4.2.1"),
            Some(HashAlgorithm::Sha256)
        );
        assert_eq!(HashAlgorithm::from_oid("1.2.3"), None);
        assert_eq!(HashAlgorithm::Sha1.to_string(), "sha1");
    }

    #[test]
    fn digest_lengths() {
        assert_eq!(HashAlgorithm::Md5.digest(b"abc").len(), 16);
        assert_eq!(HashAlgorithm::Sha1.digest(b"abc").len(), 20);
        assert_eq!(HashAlgorithm::Sha384.digest(b"abc").len(), 48);
        assert_eq!(
            hex::encode(HashAlgorithm::Sha256.digest(b"hello world")),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn known_table_has_unique_oids() {
        for (i, (oid, ..)) in KNOWN_ALGORITHMS.iter().enumerate() {
            assert!(
                KNOWN_ALGORITHMS[i + 1..].iter().all(|(other, ..)| other != oid),
                "duplicate {oid}"
            );
        }
    }
}
