use certscope_core::{CheckResult, CHECK_WEAK_HASH};

use crate::structure::{HashAlgorithm, SignatureAlgorithm};

pub fn check(alg: &SignatureAlgorithm) -> CheckResult {
    match alg.hash {
        Some(HashAlgorithm::Md5) => CheckResult::failed(CHECK_WEAK_HASH, "Using MD5"),
        Some(HashAlgorithm::Sha1) => CheckResult::failed(CHECK_WEAK_HASH, "Using SHA1"),
        Some(_) => CheckResult::passed(CHECK_WEAK_HASH, "Not using MD5 or SHA1"),
        None => CheckResult::unknown(
            CHECK_WEAK_HASH,
            "Could not determine signature hash algorithm",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::SignatureScheme;
    use certscope_core::CheckStatus;

    fn alg(hash: Option<HashAlgorithm>) -> SignatureAlgorithm {
        SignatureAlgorithm {
            oid: "1.2.3".into(),
            name: None,
            scheme: SignatureScheme::Unknown,
            hash,
        }
    }

    #[test]
    fn weak_hashes_fail() {
        let md5 = check(&alg(Some(HashAlgorithm::Md5)));
        assert_eq!(md5.status, CheckStatus::Failed);
        assert_eq!(md5.message, "Using MD5");
        assert_eq!(check(&alg(Some(HashAlgorithm::Sha1))).status, CheckStatus::Failed);
    }

    #[test]
    fn sha2_passes() {
        for hash in [HashAlgorithm::Sha224, HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
            assert_eq!(check(&alg(Some(hash))).status, CheckStatus::Passed);
        }
    }

    #[test]
    fn unresolved_hash_is_unknown() {
        assert_eq!(check(&alg(None)).status, CheckStatus::Unknown);
    }
}
