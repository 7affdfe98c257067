//! Scorer and list-format configuration with sensible defaults.
//!
//! [`RboConfig`] controls the rank-biased overlap persistence parameter.
//! [`ListFormat`] names the fields used when ingesting structured results.

use serde::{Deserialize, Serialize};

use crate::error::RankError;

/// Default RBO persistence. With `p = 0.9` the top 10 ranks carry
/// roughly 86% of the total weight.
pub const DEFAULT_PERSISTENCE: f64 = 0.9;

/// Default identifier field of structured result records.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Default wrapper key holding the ranked sequence.
pub const DEFAULT_RESULTS_FIELD: &str = "results";

/// Configuration for the rank-biased overlap scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RboConfig {
    /// Decay constant `p`. Higher values weight deeper ranks more.
    pub persistence: f64,
}

impl Default for RboConfig {
    fn default() -> Self {
        Self {
            persistence: DEFAULT_PERSISTENCE,
        }
    }
}

impl RboConfig {
    /// Validates this configuration.
    ///
    /// `persistence` must lie strictly between 0 and 1.
    pub fn validate(&self) -> Result<(), RankError> {
        if !(self.persistence > 0.0 && self.persistence < 1.0) {
            return Err(RankError::Config(format!(
                "persistence must lie in (0, 1), got {}",
                self.persistence
            )));
        }
        Ok(())
    }
}

/// How raw search output is shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFormat {
    /// Field holding the identifier in structured records.
    pub id_field: String,
    /// Key of an object wrapping the ranked sequence.
    pub results_field: String,
}

impl Default for ListFormat {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            results_field: DEFAULT_RESULTS_FIELD.to_string(),
        }
    }
}

impl ListFormat {
    /// Validates that both field names are non-empty.
    pub fn validate(&self) -> Result<(), RankError> {
        if self.id_field.is_empty() {
            return Err(RankError::Config("id_field must not be empty".into()));
        }
        if self.results_field.is_empty() {
            return Err(RankError::Config("results_field must not be empty".into()));
        }
        Ok(())
    }
}
