use tracing::debug;

use certscope_core::{CheckResult, CHECK_WEAK_KEY};

use super::config::BlocklistConfig;

/// Looks for the Debian weak-key database. Only presence is detected:
/// matching keys against it is not implemented, so the best this check
/// can report is `Unknown`.
pub fn check(config: &BlocklistConfig) -> CheckResult {
    for path in config.candidates() {
        match path.try_exists() {
            Ok(true) => {
                debug!(path = %path.display(), "weak-key blocklist found");
                return CheckResult::unknown(
                    CHECK_WEAK_KEY,
                    "badkeys database present, but blocklist matching is not implemented",
                )
                .with_detail(path.display().to_string());
            }
            Ok(false) => {}
            Err(e) => debug!(path = %path.display(), error = %e, "cannot stat blocklist path"),
        }
    }

    CheckResult::skipped(CHECK_WEAK_KEY, "badkeys blocklist not found on this system")
}
