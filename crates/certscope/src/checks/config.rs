//! Policy battery configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Well-known locations of the Debian weak-key database.
pub const DEFAULT_BLOCKLIST_PATHS: [&str; 3] = [
    "/usr/share/openssl-blacklist",
    "/usr/share/openssl-blacklist-blacklist",
    "/usr/share/openssl-blacklist/blacklist.RSA-2048",
];

/// Days before `notAfter` at which the expiry check starts warning.
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 15;

/// Where to look for the weak-key blocklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocklistConfig {
    /// Probed before `search_paths`
    pub override_path: Option<PathBuf>,
    pub search_paths: Vec<PathBuf>,
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            override_path: None,
            search_paths: DEFAULT_BLOCKLIST_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl BlocklistConfig {
    /// Config that only looks at `path`.
    #[must_use]
    pub fn only(path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: Some(path.into()),
            search_paths: Vec::new(),
        }
    }

    /// Candidate paths in probe order.
    pub fn candidates(&self) -> impl Iterator<Item = &PathBuf> {
        self.override_path.iter().chain(self.search_paths.iter())
    }
}

/// Tunables of the policy check battery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub blocklist: BlocklistConfig,
    pub expiry_warning_days: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            blocklist: BlocklistConfig::default(),
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
        }
    }
}
