//! CSV export of the per-keyword visibility table

use crate::rules::FeatureRule;
use crate::{OutputRow, Presence};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Reporter for delimited-text output.
///
/// Columns: `Keyword`, one column per feature label in rule order, then
/// `Traditional Count`, `Non-Traditional Count`, `Score`, `Grade`.
pub struct CsvReporter {
    labels: Vec<String>,
}

impl CsvReporter {
    pub fn new(rules: &[FeatureRule]) -> Self {
        Self {
            labels: rules.iter().map(|r| r.label.clone()).collect(),
        }
    }

    /// Serialize rows to CSV text
    pub fn to_csv_string(&self, rows: &[OutputRow]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        self.write_rows(&mut writer, rows)?;
        writer.flush().context("Failed to flush CSV buffer")?;
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        String::from_utf8(bytes).context("CSV output was not valid UTF-8")
    }

    /// Write rows to a CSV file
    pub fn write_file(&self, path: &Path, rows: &[OutputRow]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_rows(&mut writer, rows)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn write_rows<W: Write>(&self, writer: &mut csv::Writer<W>, rows: &[OutputRow]) -> Result<()> {
        let mut header = vec!["Keyword".to_string()];
        header.extend(self.labels.iter().cloned());
        header.extend(
            ["Traditional Count", "Non-Traditional Count", "Score", "Grade"]
                .iter()
                .map(|s| s.to_string()),
        );
        writer.write_record(&header)?;

        for row in rows {
            let mut record = Vec::with_capacity(header.len());
            record.push(row.keyword.clone());
            for label in &self.labels {
                let presence = row.presence.get(label).unwrap_or(Presence::NotApplicable);
                record.push(presence.to_string());
            }
            record.push(row.score.traditional_count.to_string());
            record.push(row.score.non_traditional_count.to_string());
            record.push(format!("{:.2}", row.score.score));
            record.push(row.score.grade.to_string());
            writer.write_record(&record)?;
        }
        Ok(())
    }

    /// Default export filename, matching the original download name
    pub fn default_filename(brand: &str) -> String {
        format!(
            "visibility_{}_{}.csv",
            brand,
            chrono::Local::now().format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;
    use crate::{Grade, PresenceRecord, ScoreResult};

    fn make_row(keyword: &str) -> OutputRow {
        let mut presence = PresenceRecord::new();
        for (i, rule) in default_rules().into_iter().enumerate() {
            let p = if i == 0 {
                Presence::Present
            } else {
                Presence::Absent
            };
            presence.push(rule.label, p);
        }
        OutputRow {
            keyword: keyword.to_string(),
            presence,
            score: ScoreResult {
                traditional_count: 1,
                non_traditional_count: 0,
                score: 1.0,
                grade: Grade::D,
            },
            json_url: None,
            html_url: None,
        }
    }

    #[test]
    fn test_header_column_order() {
        let reporter = CsvReporter::new(&default_rules());
        let csv = reporter.to_csv_string(&[]).unwrap();
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("Keyword,Organic results,"));
        assert!(header.ends_with("Traditional Count,Non-Traditional Count,Score,Grade"));
    }

    #[test]
    fn test_row_values() {
        let reporter = CsvReporter::new(&default_rules());
        let csv = reporter.to_csv_string(&[make_row("running shoes")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("running shoes,present,absent,"));
        assert!(lines[1].ends_with("1,0,1.00,D"));
    }

    #[test]
    fn test_missing_label_falls_back_to_not_applicable() {
        // Row built from a narrower rule table than the reporter's
        let reporter = CsvReporter::new(&default_rules());
        let mut row = make_row("q");
        row.presence = PresenceRecord::new();
        let csv = reporter.to_csv_string(&[row]).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("n/a"));
    }

    #[test]
    fn test_keyword_with_comma_is_quoted() {
        let reporter = CsvReporter::new(&default_rules());
        let row = make_row("shoes, running");
        let csv = reporter.to_csv_string(&[row]).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("\"shoes, running\""));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let reporter = CsvReporter::new(&default_rules());
        reporter.write_file(&path, &[make_row("a")]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Keyword,"));
    }

    #[test]
    fn test_default_filename_shape() {
        let name = CsvReporter::default_filename("acme");
        assert!(name.starts_with("visibility_acme_"));
        assert!(name.ends_with(".csv"));
    }
}
