//! Configuration types for the comparison engine.

use rank_overlap::{ListFormat, RboConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ComparatorError, Result};

/// Largest number of decimals a report may render.
pub const MAX_PRECISION: u32 = 12;

/// Top-level configuration for a comparison session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// RBO scoring settings.
    pub scoring: RboConfig,
    /// Shape of raw search output.
    pub entries: ListFormat,
    /// Matrix rendering settings.
    pub report: ReportConfig,
}

/// Presentation settings for similarity matrices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Decimal places shown for each score.
    pub precision: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

impl ComparatorConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ComparatorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ComparatorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.scoring
            .validate()
            .map_err(|e| ComparatorError::Config(e.to_string()))?;
        self.entries
            .validate()
            .map_err(|e| ComparatorError::Config(e.to_string()))?;
        if self.report.precision > MAX_PRECISION {
            return Err(ComparatorError::Config(format!(
                "report precision must be at most {MAX_PRECISION}, got {}",
                self.report.precision
            )));
        }
        Ok(())
    }

    /// Returns the default config file path: `search-comparator.toml` in the
    /// current directory.
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("search-comparator.toml")
    }
}
