use tracing::debug;

use certscope_core::{CheckResult, CHECK_SELF_SIGNED};

use crate::structure::StructuredObject;
use crate::verify::verify_self_signature;

const SELF_SIGNED: &str = "The certificate is self-signed";
const NOT_SELF_SIGNED: &str = "The certificate is not self-signed";

/// Self-signed means the names match *and* the certificate's own key
/// verifies its signature. A name match without a verifying signature is
/// reported as not self-signed, with the failure in `detail`.
pub fn check(obj: &StructuredObject) -> CheckResult {
    if !obj.is_certificate() {
        return CheckResult::not_applicable(CHECK_SELF_SIGNED, "CSR is not a certificate");
    }
    let Some(issuer) = &obj.issuer else {
        return CheckResult::unknown(CHECK_SELF_SIGNED, "Certificate has no issuer");
    };

    if issuer.raw != obj.subject.raw {
        return CheckResult::passed(CHECK_SELF_SIGNED, NOT_SELF_SIGNED)
            .with_detail("Subject != Issuer");
    }

    match verify_self_signature(obj) {
        Ok(()) => CheckResult::failed(CHECK_SELF_SIGNED, SELF_SIGNED)
            .with_detail("Subject == Issuer and signature verifies"),
        Err(e) => {
            debug!(error = %e, "subject matches issuer but self-verification failed");
            CheckResult::passed(CHECK_SELF_SIGNED, NOT_SELF_SIGNED).with_detail(format!(
                "Subject == Issuer but signature verification failed: {e}"
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::{csr, load};
    use certscope_core::CheckStatus;

    #[test]
    fn self_signed_certificate_is_flagged() {
        let obj = load(include_bytes!("../../tests/fixtures/rsa2048_selfsigned.pem"));
        let result = check(&obj);
        assert_eq!(result.status, CheckStatus::Failed);
        assert_eq!(result.message, SELF_SIGNED);
    }

    #[test]
    fn ca_issued_leaf_passes() {
        let obj = load(include_bytes!("../../tests/fixtures/rsa2048_leaf.pem"));
        let result = check(&obj);
        assert_eq!(result.status, CheckStatus::Passed);
        assert_eq!(result.detail.as_deref(), Some("Subject != Issuer"));
    }

    #[test]
    fn name_collision_passes_with_detail() {
        let obj = load(include_bytes!("../../tests/fixtures/name_collision.pem"));
        let result = check(&obj);
        assert_eq!(result.status, CheckStatus::Passed);
        assert_eq!(result.message, NOT_SELF_SIGNED);
        assert!(result
            .detail
            .as_deref()
            .is_some_and(|d| d.starts_with("Subject == Issuer but signature verification failed")));
    }

    #[test]
    fn csr_is_not_applicable() {
        let result = check(&csr());
        assert_eq!(result.status, CheckStatus::NotApplicable);
        assert_eq!(result.message, "CSR is not a certificate");
    }
}
