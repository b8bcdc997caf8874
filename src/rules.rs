//! Declarative feature rule table: one entry per SERP feature to check

use crate::FeatureCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// How to check one SERP feature for brand presence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRule {
    /// Display name; becomes the column header in tabular output
    pub label: String,
    /// Key of the feature's sub-structure within the result document.
    /// A rule without a source key always resolves to not-applicable.
    #[serde(default)]
    pub source_key: Option<String>,
    /// Field to inspect within each list item (or within a single object,
    /// e.g. the knowledge panel's `website`)
    #[serde(default)]
    pub match_field: Option<String>,
    /// Required substring of `match_field` before the brand check runs;
    /// disambiguates rules sharing one source key
    #[serde(default)]
    pub match_value: Option<String>,
    pub category: FeatureCategory,
}

impl FeatureRule {
    pub fn new(
        label: impl Into<String>,
        source_key: impl Into<String>,
        category: FeatureCategory,
    ) -> Self {
        Self {
            label: label.into(),
            source_key: Some(source_key.into()),
            match_field: None,
            match_value: None,
            category,
        }
    }

    pub fn with_match_field(mut self, field: impl Into<String>) -> Self {
        self.match_field = Some(field.into());
        self
    }

    pub fn with_match_value(mut self, value: impl Into<String>) -> Self {
        self.match_value = Some(value.into());
        self
    }
}

/// Startup configuration errors (detected before any keyword runs)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate feature label: {0:?}")]
    DuplicateLabel(String),
    #[error("feature rule with an empty label")]
    EmptyLabel,
    #[error("category weights must be finite and non-negative")]
    InvalidWeight,
    #[error("grade thresholds must be finite and non-increasing from A to D")]
    UnorderedThresholds,
}

/// The built-in Google SERP feature table
pub fn default_rules() -> Vec<FeatureRule> {
    use FeatureCategory::{NonTraditional, Traditional};
    vec![
        FeatureRule::new("Organic results", "organic_results", Traditional),
        FeatureRule::new("Knowledge panel", "knowledge_graph", NonTraditional)
            .with_match_field("website"),
        FeatureRule::new("People Also Ask", "people_also_ask", NonTraditional),
        FeatureRule::new("Videos", "inline_videos", NonTraditional),
        FeatureRule::new("Ads", "ads", NonTraditional),
        FeatureRule::new("Shopping results", "shopping_results", NonTraditional),
        FeatureRule::new("Popular products", "immersive_products", NonTraditional),
        FeatureRule::new("Related searches", "related_searches", NonTraditional),
        FeatureRule::new(
            "Discussions and forums",
            "discussions_and_forums",
            NonTraditional,
        ),
    ]
}

/// Reject rule tables that would produce ambiguous output columns
pub fn validate_rules(rules: &[FeatureRule]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if rule.label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        if !seen.insert(rule.label.as_str()) {
            return Err(ConfigError::DuplicateLabel(rule.label.clone()));
        }
    }
    Ok(())
}
