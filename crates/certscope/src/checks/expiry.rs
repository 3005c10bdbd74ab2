use chrono::{DateTime, Utc};

use certscope_core::{CheckResult, CHECK_EXPIRY};

use crate::structure::StructuredObject;

const SECONDS_PER_DAY: i64 = 86_400;

/// Expiry against `now`; `warning_days` is the warning window.
pub fn check(obj: &StructuredObject, now: DateTime<Utc>, warning_days: i64) -> CheckResult {
    if !obj.is_certificate() {
        return CheckResult::not_applicable(CHECK_EXPIRY, "CSR has no expiry");
    }
    let Some(validity) = obj.validity else {
        return CheckResult::unknown(CHECK_EXPIRY, "Could not determine expiry date");
    };

    let not_after = validity.not_after;
    let date = not_after.format("%b %d %Y");
    if not_after <= now {
        return CheckResult::failed(CHECK_EXPIRY, format!("Expired {date}"));
    }

    let days = (not_after - now).num_seconds().div_euclid(SECONDS_PER_DAY);
    let message = format!("Expires {date} (in {days} days)");
    if days < warning_days {
        CheckResult::warning(CHECK_EXPIRY, message)
    } else {
        CheckResult::passed(CHECK_EXPIRY, message)
    }
}
