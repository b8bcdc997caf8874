//! JSON reporter for machine-readable output

use crate::engine::AggregateStats;
use crate::OutputRow;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single keyword row as JSON
    pub fn report(&self, row: &OutputRow) -> String {
        self.to_json(row)
    }

    /// Report all rows as a JSON array
    pub fn report_many(&self, rows: &[OutputRow]) -> String {
        self.to_json(&rows)
    }

    /// Report rows together with the run summary
    pub fn report_with_summary(&self, rows: &[OutputRow], stats: &AggregateStats) -> String {
        self.to_json(&JsonOutput {
            results: rows,
            summary: JsonSummary {
                keywords: stats.keywords,
                average_score: stats.average_score,
                average_grade: stats.average_grade.to_string(),
                fetch_failures: stats.fetch_failures,
            },
        })
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [OutputRow],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    keywords: usize,
    average_score: f64,
    average_grade: String,
    fetch_failures: usize,
}
