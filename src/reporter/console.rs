//! Console reporter with colored output

use crate::engine::AggregateStats;
use crate::scoring::ScoreCalculator;
use crate::{Grade, OutputRow, Presence};
use colored::{ColoredString, Colorize};

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show SERP metadata URLs
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single keyword row
    pub fn report(&self, row: &OutputRow) {
        println!();
        println!("{}", format!("🔍 {}", row.keyword).bold());
        for (label, presence) in row.presence.iter() {
            println!("   {} {}", self.presence_mark(presence), label);
        }
        println!(
            "   Score: {:.2} ({})  traditional: {}  non-traditional: {}",
            row.score.score,
            self.colorize_grade(row.score.grade).bold(),
            row.score.traditional_count,
            row.score.non_traditional_count
        );
        println!(
            "   {}",
            ScoreCalculator::grade_description(row.score.grade).dimmed()
        );
        if self.verbose {
            if let Some(ref url) = row.json_url {
                println!("   JSON: {}", url.dimmed());
            }
            if let Some(ref url) = row.html_url {
                println!("   HTML: {}", url.dimmed());
            }
        }
    }

    /// Report all rows followed by the run summary
    pub fn report_many(&self, rows: &[OutputRow], stats: &AggregateStats) {
        for row in rows {
            self.report(row);
        }
        println!();
        println!("{}", "─".repeat(60));
        self.print_summary(stats);
    }

    /// Report in quiet mode (one line per keyword)
    pub fn report_quiet(&self, row: &OutputRow) {
        println!("{}", self.quiet_line(row));
    }

    fn quiet_line(&self, row: &OutputRow) -> String {
        format!(
            "{}: {:.2} ({})",
            row.keyword,
            row.score.score,
            self.colorize_grade(row.score.grade)
        )
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!("{}", "Summary".bold());
        println!("   Keywords: {}", stats.keywords);
        println!(
            "   Average score: {:.2} ({})",
            stats.average_score,
            self.colorize_grade(stats.average_grade)
        );
        if stats.fetch_failures > 0 {
            println!(
                "   {}",
                format!("Fetch failures: {}", stats.fetch_failures).yellow()
            );
        }
    }

    fn presence_mark(&self, presence: Presence) -> ColoredString {
        let mark = match presence {
            Presence::Present => "✓",
            Presence::Absent => "✗",
            Presence::NotApplicable => "-",
        };
        if !self.use_colors {
            return mark.normal();
        }
        match presence {
            Presence::Present => mark.green(),
            Presence::Absent => mark.red(),
            Presence::NotApplicable => mark.dimmed(),
        }
    }

    fn colorize_grade(&self, grade: Grade) -> ColoredString {
        let s = grade.to_string();
        if !self.use_colors {
            return s.normal();
        }
        match grade {
            Grade::A => s.green(),
            Grade::B => s.cyan(),
            Grade::C | Grade::D => s.yellow(),
            Grade::F => s.red(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PresenceRecord, ScoreResult};

    fn make_row(keyword: &str, score: f64, grade: Grade) -> OutputRow {
        let mut presence = PresenceRecord::new();
        presence.push("Organic results", Presence::Present);
        presence.push("Ads", Presence::NotApplicable);
        OutputRow {
            keyword: keyword.to_string(),
            presence,
            score: ScoreResult {
                traditional_count: 1,
                non_traditional_count: 0,
                score,
                grade,
            },
            json_url: None,
            html_url: None,
        }
    }

    #[test]
    fn test_quiet_line_without_colors() {
        let reporter = ConsoleReporter::new().without_colors();
        let line = reporter.quiet_line(&make_row("espresso machine", 1.0, Grade::D));
        assert_eq!(line, "espresso machine: 1.00 (D)");
    }

    #[test]
    fn test_presence_marks_without_colors() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(reporter.presence_mark(Presence::Present).to_string(), "✓");
        assert_eq!(reporter.presence_mark(Presence::Absent).to_string(), "✗");
        assert_eq!(
            reporter.presence_mark(Presence::NotApplicable).to_string(),
            "-"
        );
    }

    #[test]
    fn test_grade_colorization_plain() {
        let reporter = ConsoleReporter::new().without_colors();
        for grade in [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F] {
            assert_eq!(reporter.colorize_grade(grade).to_string(), grade.to_string());
        }
    }
}
