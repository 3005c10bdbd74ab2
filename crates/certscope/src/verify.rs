//! Self-signature verification.
//!
//! A certificate's own public key is checked against its `tbsCertificate`
//! and signature. The primitive is selected by key family:
//!
//! | key | backend | notes |
//! |-----|---------|-------|
//! | RSA | `rsa` (PKCS#1 v1.5) | any modulus up to 16384 bits, MD5/SHA-1/SHA-2 |
//! | EC  | `p256` / `p384` / `p521` (pre-hashed, DER signatures) | any curve/hash pair of those curves |
//! | DSA | `dsa` (pre-hashed) | digest taken from the signature algorithm |
//!
//! Every family goes through the RustCrypto crates with the digest computed
//! up front. `ring` has no DSA and refuses RSA moduli below 1024 bits.

use dsa::pkcs8::DecodePublicKey;
use dsa::signature::hazmat::PrehashVerifier;
use md5::Md5;
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::error::VerifyError;
use crate::structure::{
    Curve, DsaKey, EcKey, HashAlgorithm, NamedCurve, PublicKey, RsaKey, SignatureAlgorithm,
    SignatureScheme, StructuredObject,
};

/// Largest RSA modulus accepted for verification.
const MAX_RSA_BITS: usize = 16384;

/// Verify `obj`'s signature with `obj`'s own public key.
///
/// # Errors
///
/// Returns `VerifyError` when the object has nothing to verify, the key or
/// algorithm is unsupported, or the signature does not match.
pub fn verify_self_signature(obj: &StructuredObject) -> Result<(), VerifyError> {
    let tbs = obj.tbs.as_deref().ok_or(VerifyError::MissingSignedData)?;
    let alg = &obj.signature_algorithm;

    match &obj.public_key {
        PublicKey::Rsa(key) => verify_rsa(key, alg, tbs, &obj.signature),
        PublicKey::Ec(key) => verify_ecdsa(key, alg, tbs, &obj.signature),
        PublicKey::Dsa(key) => verify_dsa(key, alg, tbs, &obj.signature),
        PublicKey::Other(other) => Err(VerifyError::UnsupportedKey(other.name.clone())),
    }
}

fn verify_rsa(
    key: &RsaKey,
    alg: &SignatureAlgorithm,
    tbs: &[u8],
    signature: &[u8],
) -> Result<(), VerifyError> {
    if alg.scheme != SignatureScheme::RsaPkcs1 {
        return Err(VerifyError::UnsupportedAlgorithm(display_name(alg)));
    }
    let hash = alg.hash.ok_or(VerifyError::UnknownHash)?;
    if key.modulus.is_empty() {
        return Err(VerifyError::InvalidKey("RSA key could not be parsed".to_string()));
    }

    let public = RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(&key.modulus),
        BigUint::from_bytes_be(&key.exponent),
        MAX_RSA_BITS,
    )
    .map_err(|e| VerifyError::InvalidKey(e.to_string()))?;

    let scheme = match hash {
        HashAlgorithm::Md5 => Pkcs1v15Sign::new::<Md5>(),
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        HashAlgorithm::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    };

    public
        .verify(scheme, &hash.digest(tbs), signature)
        .map_err(|_| VerifyError::BadSignature)
}

fn verify_ecdsa(
    key: &EcKey,
    alg: &SignatureAlgorithm,
    tbs: &[u8],
    signature: &[u8],
) -> Result<(), VerifyError> {
    let hash = alg.hash.ok_or(VerifyError::UnknownHash)?;

    let Curve::Named(curve) = &key.curve else {
        return Err(VerifyError::UnsupportedAlgorithm(format!(
            "ECDSA on {} with {hash}",
            key.curve.name().unwrap_or("explicit curve")
        )));
    };
    let digest = hash.digest(tbs);

    // Points that do not decode on the curve are key errors; anything wrong
    // with the signature itself is a bad signature.
    let verified = match curve {
        NamedCurve::Secp256r1 => {
            let verifying = p256::ecdsa::VerifyingKey::from_sec1_bytes(&key.point)
                .map_err(|_| invalid_point(*curve))?;
            p256::ecdsa::Signature::from_der(signature)
                .and_then(|sig| verifying.verify_prehash(&digest, &sig))
        }
        NamedCurve::Secp384r1 => {
            let verifying = p384::ecdsa::VerifyingKey::from_sec1_bytes(&key.point)
                .map_err(|_| invalid_point(*curve))?;
            p384::ecdsa::Signature::from_der(signature)
                .and_then(|sig| verifying.verify_prehash(&digest, &sig))
        }
        NamedCurve::Secp521r1 => {
            let verifying = p521::ecdsa::VerifyingKey::from_sec1_bytes(&key.point)
                .map_err(|_| invalid_point(*curve))?;
            p521::ecdsa::Signature::from_der(signature)
                .and_then(|sig| verifying.verify_prehash(&digest, &sig))
        }
        other => {
            return Err(VerifyError::UnsupportedAlgorithm(format!(
                "ECDSA on {} with {hash}",
                other.name()
            )))
        }
    };

    verified.map_err(|_| VerifyError::BadSignature)
}

fn invalid_point(curve: NamedCurve) -> VerifyError {
    VerifyError::InvalidKey(format!("point is not on {}", curve.name()))
}

fn verify_dsa(
    key: &DsaKey,
    alg: &SignatureAlgorithm,
    tbs: &[u8],
    signature: &[u8],
) -> Result<(), VerifyError> {
    if alg.scheme != SignatureScheme::Dsa {
        return Err(VerifyError::UnsupportedAlgorithm(display_name(alg)));
    }
    let hash = alg.hash.ok_or(VerifyError::UnknownHash)?;

    let verifying = dsa::VerifyingKey::from_public_key_der(&key.spki_der)
        .map_err(|e| VerifyError::InvalidKey(e.to_string()))?;
    let signature = dsa::Signature::try_from(signature).map_err(|_| VerifyError::BadSignature)?;

    verifying
        .verify_prehash(&hash.digest(tbs), &signature)
        .map_err(|_| VerifyError::BadSignature)
}

fn display_name(alg: &SignatureAlgorithm) -> String {
    alg.name.clone().unwrap_or_else(|| alg.oid.clone())
}
