use serde::{Deserialize, Serialize};

/// Name of the expiry check
pub const CHECK_EXPIRY: &str = "Expiry";
/// Name of the weak-key blocklist check
pub const CHECK_WEAK_KEY: &str = "Debian Weak Key";
/// Name of the self-signed check
pub const CHECK_SELF_SIGNED: &str = "Self-Signed";
/// Name of the key size check
pub const CHECK_KEY_SIZE: &str = "Key Size";
/// Name of the weak signature hash check
pub const CHECK_WEAK_HASH: &str = "MD5/SHA1";

/// Battery order; every decode yields exactly these checks in this order.
pub const CHECK_ORDER: [&str; 5] = [
    CHECK_EXPIRY,
    CHECK_WEAK_KEY,
    CHECK_SELF_SIGNED,
    CHECK_KEY_SIZE,
    CHECK_WEAK_HASH,
];

/// Verdict of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Warning,
    Failed,
    Info,
    NotApplicable,
    Unknown,
    Skipped,
}

/// Coarse severity used by renderers for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    Ok,
    Warn,
    Fail,
    Na,
}

impl CheckStatus {
    /// Upper-case label as shown in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Warning => "WARNING",
            Self::Failed => "FAILED",
            Self::Info => "INFO",
            Self::NotApplicable => "N/A",
            Self::Unknown => "UNKNOWN",
            Self::Skipped => "SKIPPED",
        }
    }

    #[must_use]
    pub const fn level(self) -> CheckLevel {
        match self {
            Self::Passed => CheckLevel::Ok,
            Self::Warning | Self::Unknown => CheckLevel::Warn,
            Self::Failed => CheckLevel::Fail,
            Self::Info | Self::NotApplicable | Self::Skipped => CheckLevel::Na,
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name, one of [`CHECK_ORDER`]
    pub name: String,
    pub status: CheckStatus,
    /// Human-readable one-liner, never empty
    pub message: String,
    /// Extra diagnostic text (verification errors, paths found, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResult {
    pub fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn passed(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Passed, message)
    }

    pub fn warning(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warning, message)
    }

    pub fn failed(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Failed, message)
    }

    pub fn unknown(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Unknown, message)
    }

    pub fn skipped(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Skipped, message)
    }

    pub fn not_applicable(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::NotApplicable, message)
    }
}
