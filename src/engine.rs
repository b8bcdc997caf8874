//! Visibility engine - runs extraction and scoring over a keyword list

use crate::extractor;
use crate::rules::{default_rules, FeatureRule};
use crate::scoring::{round2, GradeThresholds, ScoreCalculator, ScoreWeights};
use crate::source::ResultSource;
use crate::{Grade, OutputRow};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Orchestrates fetch, extraction, and scoring, one keyword at a time.
///
/// Rules, weights, and thresholds are held here and passed down explicitly;
/// there is no shared mutable state across keyword evaluations.
pub struct VisibilityEngine {
    rules: Vec<FeatureRule>,
    weights: ScoreWeights,
    thresholds: GradeThresholds,
    /// Pause between keyword fetches; SerpAPI throttling
    delay: Duration,
    quiet: bool,
}

impl VisibilityEngine {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            weights: ScoreWeights::default(),
            thresholds: GradeThresholds::default(),
            delay: Duration::from_millis(1200),
            quiet: false,
        }
    }

    /// Replace the built-in rule table (the caller validates it first)
    pub fn with_rules(mut self, rules: Vec<FeatureRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_thresholds(mut self, thresholds: GradeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Suppress per-keyword fetch warnings on stderr
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn rules(&self) -> &[FeatureRule] {
        &self.rules
    }

    /// Evaluate one keyword against an already-fetched result document
    pub fn evaluate(&self, keyword: &str, brand: &str, doc: &Value) -> OutputRow {
        let presence = extractor::extract(doc, brand, &self.rules);
        let score = ScoreCalculator::score(&presence, &self.rules, &self.weights, &self.thresholds);
        let metadata = doc.get("search_metadata");
        OutputRow {
            keyword: keyword.to_string(),
            presence,
            score,
            json_url: metadata_url(metadata, "json_endpoint"),
            html_url: metadata_url(metadata, "raw_html_file"),
        }
    }

    /// Run the full keyword list sequentially, in input order.
    ///
    /// A failed fetch is never fatal: the keyword is evaluated against an
    /// empty document (every rule degrades to not-applicable) and counted.
    /// Returns the rows and the number of fetch failures.
    pub fn run(
        &self,
        source: &dyn ResultSource,
        brand: &str,
        keywords: &[String],
    ) -> (Vec<OutputRow>, usize) {
        let mut rows = Vec::with_capacity(keywords.len());
        let mut failures = 0;

        for (i, keyword) in keywords.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }

            let doc = match source.fetch(keyword) {
                Ok(doc) => doc,
                Err(e) => {
                    failures += 1;
                    if !self.quiet {
                        eprintln!(
                            "{}: fetch failed for {:?}: {}",
                            "Warning".yellow(),
                            keyword,
                            e
                        );
                    }
                    Value::Object(Default::default())
                }
            };

            rows.push(self.evaluate(keyword, brand, &doc));
        }

        (rows, failures)
    }

    /// Summarize a finished run
    pub fn aggregate_stats(&self, rows: &[OutputRow], fetch_failures: usize) -> AggregateStats {
        let keywords = rows.len();
        let average_score = if keywords == 0 {
            0.0
        } else {
            round2(rows.iter().map(|r| r.score.score).sum::<f64>() / keywords as f64)
        };
        AggregateStats {
            keywords,
            average_score,
            average_grade: self.thresholds.grade(average_score),
            fetch_failures,
        }
    }
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary across all evaluated keywords
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub keywords: usize,
    pub average_score: f64,
    pub average_grade: Grade,
    pub fetch_failures: usize,
}

fn metadata_url(metadata: Option<&Value>, key: &str) -> Option<String> {
    metadata
        .and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .map(String::from)
}
