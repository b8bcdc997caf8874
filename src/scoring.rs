//! Visibility score and letter grade derivation

use crate::rules::{ConfigError, FeatureRule};
use crate::{FeatureCategory, Grade, PresenceRecord, ScoreResult};
use serde::{Deserialize, Serialize};

/// Weight applied to each presence count by category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    pub traditional: f64,
    pub non_traditional: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            traditional: 1.0,
            non_traditional: 0.5,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |w: f64| w.is_finite() && w >= 0.0;
        if ok(self.traditional) && ok(self.non_traditional) {
            Ok(())
        } else {
            Err(ConfigError::InvalidWeight)
        }
    }
}

/// Grade cutoffs, evaluated highest-first; anything below `d` is an F
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeThresholds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            a: 2.5,
            b: 2.0,
            c: 1.5,
            d: 1.0,
        }
    }
}

impl GradeThresholds {
    /// Map a score to a grade; total over all finite scores
    pub fn grade(&self, score: f64) -> Grade {
        if score >= self.a {
            Grade::A
        } else if score >= self.b {
            Grade::B
        } else if score >= self.c {
            Grade::C
        } else if score >= self.d {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cuts = [self.a, self.b, self.c, self.d];
        if cuts.iter().all(|c| c.is_finite()) && cuts.windows(2).all(|w| w[0] >= w[1]) {
            Ok(())
        } else {
            Err(ConfigError::UnorderedThresholds)
        }
    }
}

/// Calculator for per-keyword visibility scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Reduce a presence record into counts, a weighted score, and a grade.
    /// Pure and total: any well-typed record yields a result.
    pub fn score(
        record: &PresenceRecord,
        rules: &[FeatureRule],
        weights: &ScoreWeights,
        thresholds: &GradeThresholds,
    ) -> ScoreResult {
        let mut traditional = 0usize;
        let mut non_traditional = 0usize;
        for rule in rules {
            if record.get(&rule.label).is_some_and(|p| p.is_present()) {
                match rule.category {
                    FeatureCategory::Traditional => traditional += 1,
                    FeatureCategory::NonTraditional => non_traditional += 1,
                }
            }
        }

        let raw = traditional as f64 * weights.traditional
            + non_traditional as f64 * weights.non_traditional;
        let score = round2(raw);

        ScoreResult {
            traditional_count: traditional,
            non_traditional_count: non_traditional,
            score,
            grade: thresholds.grade(score),
        }
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - the brand shows up across most SERP features",
            Grade::B => "Good - solid visibility with room to grow",
            Grade::C => "Fair - the brand appears in a few features",
            Grade::D => "Poor - visibility is limited to a single feature",
            Grade::F => "Missing - the brand is effectively invisible for this query",
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
