//! SHA-1 thumbprints via `ring::digest`.

use ring::digest::{digest, SHA1_FOR_LEGACY_USE_ONLY};

/// SHA-1 of a DER-encoded certificate, upper-case hex.
#[must_use]
pub fn sha1_thumbprint(der: &[u8]) -> String {
    let digest = digest(&SHA1_FOR_LEGACY_USE_ONLY, der);
    hex::encode_upper(digest.as_ref())
}
