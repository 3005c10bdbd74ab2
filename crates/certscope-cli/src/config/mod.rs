//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Weak-key blocklist location probed before the system paths.
    pub badkeys_dir: Option<PathBuf>,

    /// Expiry warning window in days.
    pub expiry_warning_days: Option<i64>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "certscope", "certscope")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Apply `key = value`; the caller saves.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "badkeys_dir" => self.badkeys_dir = Some(PathBuf::from(value)),
            "expiry_warning_days" => {
                let days: i64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("expiry_warning_days must be a whole number, got {value}"))?;
                anyhow::ensure!(days >= 0, "expiry_warning_days cannot be negative");
                self.expiry_warning_days = Some(days);
            }
            _ => {
                anyhow::bail!(
                    "Unknown config key: {}\n\n\
                     Available keys:\n  \
                     output_format        - Default output format (pretty/json/csv/yaml)\n  \
                     badkeys_dir          - Weak-key blocklist location\n  \
                     expiry_warning_days  - Warn this many days before expiry",
                    key
                );
            }
        }
        Ok(())
    }
}
