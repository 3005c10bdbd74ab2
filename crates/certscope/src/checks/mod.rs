//! Policy check battery.
//!
//! Every check is total: it always produces exactly one [`CheckResult`]
//! and turns internal failures into `Unknown` or `Skipped` results. The
//! battery order is fixed, see [`CHECK_ORDER`](certscope_core::CHECK_ORDER).

mod blocklist;
mod config;
mod expiry;
mod key_size;
mod self_signed;
mod weak_hash;

use chrono::{DateTime, Utc};
use tracing::trace;

use certscope_core::CheckResult;

use crate::structure::StructuredObject;

pub use config::{
    BlocklistConfig, PolicyConfig, DEFAULT_BLOCKLIST_PATHS, DEFAULT_EXPIRY_WARNING_DAYS,
};

/// Runs the fixed battery of checks with an explicit configuration.
#[derive(Debug, Clone, Default)]
pub struct PolicyBattery {
    config: PolicyConfig,
}

impl PolicyBattery {
    #[must_use]
    pub const fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Run every check against `obj`, evaluating expiry at `now`.
    #[must_use]
    pub fn run(&self, obj: &StructuredObject, now: DateTime<Utc>) -> Vec<CheckResult> {
        let results = vec![
            expiry::check(obj, now, self.config.expiry_warning_days),
            blocklist::check(&self.config.blocklist),
            self_signed::check(obj),
            key_size::check(&obj.public_key),
            weak_hash::check(&obj.signature_algorithm),
        ];

        for result in &results {
            trace!(check = %result.name, status = %result.status, message = %result.message);
        }
        results
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{sniff, structure};
    use certscope_core::{CheckStatus, Validity, CHECK_ORDER};
    use tempfile::TempDir;

    pub(crate) fn load(bytes: &[u8]) -> StructuredObject {
        structure::decode(&sniff::sniff(bytes).unwrap()).unwrap()
    }

    pub(crate) fn csr() -> StructuredObject {
        load(include_bytes!("../../tests/fixtures/request.csr.pem"))
    }

    pub(crate) fn cert_expiring(not_after: DateTime<Utc>) -> StructuredObject {
        let mut obj = load(include_bytes!("../../tests/fixtures/rsa2048_leaf.pem"));
        obj.validity = Some(Validity {
            not_before: not_after - chrono::Duration::days(365),
            not_after,
        });
        obj
    }

    fn battery_without_blocklist() -> (PolicyBattery, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = PolicyConfig {
            blocklist: BlocklistConfig::only(dir.path().join("absent")),
            ..PolicyConfig::default()
        };
        (PolicyBattery::new(config), dir)
    }

    #[test]
    fn battery_order_is_fixed() {
        let (battery, _dir) = battery_without_blocklist();
        for obj in [cert_expiring(Utc::now()), csr()] {
            let names: Vec<_> = battery
                .run(&obj, Utc::now())
                .into_iter()
                .map(|r| r.name)
                .collect();
            assert_eq!(names, CHECK_ORDER);
        }
    }

    #[test]
    fn csr_gets_placeholders() {
        let (battery, _dir) = battery_without_blocklist();
        let results = battery.run(&csr(), Utc::now());
        assert_eq!(results[0].status, CheckStatus::NotApplicable);
        assert_eq!(results[1].status, CheckStatus::Skipped);
        assert_eq!(results[2].status, CheckStatus::NotApplicable);
        assert_eq!(results[3].status, CheckStatus::Passed);
        assert_eq!(results[4].status, CheckStatus::Passed);
        assert!(results.iter().all(|r| !r.message.is_empty()));
    }
}
