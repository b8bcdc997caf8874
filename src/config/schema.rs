//! Config schema and deserialization

use crate::rules::{validate_rules, ConfigError, FeatureRule};
use crate::scoring::{GradeThresholds, ScoreWeights};
use serde::Deserialize;

/// Root config structure for .serpvisrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Brand to track; --brand on the CLI overrides this
    pub brand: Option<String>,

    /// Interface language code sent with each query (default: en)
    pub hl: Option<String>,

    /// Geolocation country code sent with each query (default: us)
    pub gl: Option<String>,

    /// Milliseconds to wait between keyword fetches (default: 1200)
    pub delay_ms: Option<u64>,

    /// Minimum average score (exit 1 if below)
    pub threshold: Option<f64>,

    /// Category weight overrides
    pub weights: Option<ScoreWeights>,

    /// Grade cutoff overrides
    pub thresholds: Option<GradeThresholds>,

    /// Full replacement for the built-in feature rule table
    pub features: Option<Vec<FeatureRule>>,
}

impl Config {
    /// Fail-fast validation of everything a run depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref features) = self.features {
            validate_rules(features)?;
        }
        if let Some(ref weights) = self.weights {
            weights.validate()?;
        }
        if let Some(ref thresholds) = self.thresholds {
            thresholds.validate()?;
        }
        Ok(())
    }
}
