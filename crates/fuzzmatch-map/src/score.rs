//! Similarity scoring for a pair of labels.
//!
//! Combines four ratios (whole string, partial, token sort, token set) into a
//! single score on a 0-100 scale according to a [`ScoringPolicy`].

use std::fmt;

use fuzzmatch_model::ScoringPolicy;
use serde::Serialize;

use crate::ratio::{partial_ratio, ratio, token_set_ratio, token_sort_ratio};

/// A whole-string ratio above this is trusted as-is.
const HIGH_CONFIDENCE_RATIO: f64 = 95.0;
/// A partial ratio at this value is trusted as-is.
const PERFECT_SCORE: f64 = 100.0;
/// Character-count difference above which the partial ratio dominates.
const LENGTH_DIFF_LIMIT: usize = 5;
/// Partial ratio weight for strings of very different length.
const LENGTH_MISMATCH_PARTIAL_WEIGHT: f64 = 0.9;
/// Whole-string ratio weight for strings of very different length.
const LENGTH_MISMATCH_RATIO_WEIGHT: f64 = 0.8;
/// Partial ratio weight for strings of similar length.
const SIMILAR_LENGTH_PARTIAL_WEIGHT: f64 = 0.95;

/// Anything that can score a pair of labels on a 0-100 scale.
pub trait Scorer {
    fn score(&self, left: &str, right: &str) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, left: &str, right: &str) -> f64 {
        self(left, right)
    }
}

/// The four raw ratios computed for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    pub ratio: f64,
    pub partial: f64,
    pub token_sort: f64,
    pub token_set: f64,
}

impl SubScores {
    fn compute(left: &str, right: &str) -> Self {
        Self {
            ratio: ratio(left, right),
            partial: partial_ratio(left, right),
            token_sort: token_sort_ratio(left, right),
            token_set: token_set_ratio(left, right),
        }
    }

    /// Best of the whole-string and token ratios, excluding partial.
    #[must_use]
    pub fn max_ratio(&self) -> f64 {
        self.ratio.max(self.token_sort).max(self.token_set)
    }

    /// Best of all four ratios.
    #[must_use]
    pub fn max_all(&self) -> f64 {
        self.max_ratio().max(self.partial)
    }
}

/// Which combination rule produced the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    /// One operand was empty.
    EmptyInput,
    /// Operands were identical after lower-casing.
    Identical,
    /// Best ratio above 95 or a perfect partial ratio.
    HighConfidence,
    /// Length difference above 5: partial ratio favoured.
    LengthMismatch,
    /// Length difference of 5 or less: stronger signal wins.
    SimilarLength,
    /// Plain maximum of the four ratios.
    MaxRatio,
}

impl fmt::Display for ScoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmptyInput => "empty input",
            Self::Identical => "identical",
            Self::HighConfidence => "high confidence",
            Self::LengthMismatch => "length mismatch",
            Self::SimilarLength => "similar length",
            Self::MaxRatio => "max ratio",
        };
        f.write_str(text)
    }
}

/// Final score together with the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub rule: ScoreRule,
    /// Absent when a short-circuit rule fired before any ratio was computed.
    pub components: Option<SubScores>,
}

impl ScoreBreakdown {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        match &self.components {
            Some(parts) => format!(
                "{}: ratio {:.0}; partial {:.0}; token sort {:.0}; token set {:.0}",
                self.rule, parts.ratio, parts.partial, parts.token_sort, parts.token_set
            ),
            None => self.rule.to_string(),
        }
    }
}

/// Scores label pairs with a fixed policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimilarityScorer {
    policy: ScoringPolicy,
}

impl SimilarityScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Score a pair and report how the score was reached.
    pub fn breakdown(&self, left: &str, right: &str) -> ScoreBreakdown {
        let left = left.to_lowercase();
        let right = right.to_lowercase();
        match self.policy {
            ScoringPolicy::Weighted => weighted(&left, &right),
            ScoringPolicy::MaxRatio => {
                let parts = SubScores::compute(&left, &right);
                ScoreBreakdown {
                    score: parts.max_all(),
                    rule: ScoreRule::MaxRatio,
                    components: Some(parts),
                }
            }
        }
    }
}

impl Scorer for SimilarityScorer {
    fn score(&self, left: &str, right: &str) -> f64 {
        self.breakdown(left, right).score
    }
}

fn weighted(left: &str, right: &str) -> ScoreBreakdown {
    if left.is_empty() || right.is_empty() {
        return ScoreBreakdown {
            score: 0.0,
            rule: ScoreRule::EmptyInput,
            components: None,
        };
    }
    if left == right {
        return ScoreBreakdown {
            score: PERFECT_SCORE,
            rule: ScoreRule::Identical,
            components: None,
        };
    }

    let parts = SubScores::compute(left, right);
    let max_ratio = parts.max_ratio();
    let (score, rule) = if max_ratio > HIGH_CONFIDENCE_RATIO || parts.partial == PERFECT_SCORE {
        (max_ratio, ScoreRule::HighConfidence)
    } else if left.chars().count().abs_diff(right.chars().count()) > LENGTH_DIFF_LIMIT {
        (
            (parts.partial * LENGTH_MISMATCH_PARTIAL_WEIGHT)
                .max(max_ratio * LENGTH_MISMATCH_RATIO_WEIGHT),
            ScoreRule::LengthMismatch,
        )
    } else {
        (
            max_ratio.max(parts.partial * SIMILAR_LENGTH_PARTIAL_WEIGHT),
            ScoreRule::SimilarLength,
        )
    };

    ScoreBreakdown {
        score,
        rule,
        components: Some(parts),
    }
}
