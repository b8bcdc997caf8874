//! Serpvis: brand visibility tracking across Google SERP features
//!
//! Given a brand name and a list of keywords, serpvis inspects the structured
//! result payload returned for each keyword and resolves every configured SERP
//! feature (organic results, knowledge panel, People Also Ask, ...) to a
//! tri-state presence outcome, then derives a weighted visibility score and a
//! letter grade per keyword.

pub mod config;
pub mod engine;
pub mod extractor;
pub mod reporter;
pub mod rules;
pub mod scoring;
pub mod source;

use serde::{Deserialize, Serialize};

/// Classification of a SERP feature for scoring purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureCategory {
    /// Classic organic-listing-style result, weighted higher
    Traditional,
    /// Rich/enhanced SERP module, weighted lower
    NonTraditional,
}

/// Outcome of checking one feature for brand presence.
///
/// "Brand absent" and "feature not on this SERP" are different signals and are
/// kept apart rather than collapsed into a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presence {
    Present,
    Absent,
    /// The feature has no structured anchor in this result document
    NotApplicable,
}

impl Presence {
    pub fn is_present(self) -> bool {
        matches!(self, Presence::Present)
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Presence::Present => write!(f, "present"),
            Presence::Absent => write!(f, "absent"),
            Presence::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// One feature outcome within a presence record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    /// Feature rule label
    pub label: String,
    pub presence: Presence,
}

/// Per-keyword mapping from feature label to presence outcome.
///
/// Entries stay in rule declaration order so tabular output has a stable
/// column order; exactly one entry exists per rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceRecord {
    entries: Vec<PresenceEntry>,
}

impl PresenceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, presence: Presence) {
        self.entries.push(PresenceEntry {
            label: label.into(),
            presence,
        });
    }

    /// Look up the outcome for a feature label
    pub fn get(&self, label: &str) -> Option<Presence> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.presence)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Presence)> {
        self.entries.iter().map(|e| (e.label.as_str(), e.presence))
    }

    pub fn entries(&self) -> &[PresenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counts, weighted score, and grade derived from one presence record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Number of traditional features with a present outcome
    pub traditional_count: usize,
    /// Number of non-traditional features with a present outcome
    pub non_traditional_count: usize,
    /// Weighted score, rounded to two decimals
    pub score: f64,
    pub grade: Grade,
}

/// One row of the visibility table: keyword, presence outcomes, score fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRow {
    pub keyword: String,
    pub presence: PresenceRecord,
    pub score: ScoreResult,
    /// SerpAPI JSON endpoint for this query, when the payload carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_url: Option<String>,
    /// SerpAPI raw HTML archive for this query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}
