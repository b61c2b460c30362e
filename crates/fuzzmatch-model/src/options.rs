//! Configuration options for a matching run.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Default minimum score a pair needs to be committed by the greedy pass.
pub const DEFAULT_MIN_SCORE: f64 = 20.0;

/// Default threshold sweep: exact matches first, then near-exact ones.
pub const DEFAULT_THRESHOLDS: [f64; 2] = [100.0, 95.0];

/// Default number of scored pairs between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Partner marker written next to items that received no match.
pub const NO_MATCH_FOUND: &str = "NO MATCH FOUND";

/// How sub-scores are combined into a single similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPolicy {
    /// Short-circuit on empty and identical inputs, then weight the partial
    /// ratio against the whole-string ratios by length difference.
    #[default]
    Weighted,
    /// Plain maximum of the four raw ratios.
    MaxRatio,
}

impl ScoringPolicy {
    /// Short name used on the command line and in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::MaxRatio => "max-ratio",
        }
    }
}

/// Immutable options for one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Pairs scoring below this are left unmatched by the greedy pass.
    pub min_score: f64,
    /// Descending thresholds for the first-fit sweep.
    pub thresholds: Vec<f64>,
    /// Scoring policy applied to every pair.
    pub policy: ScoringPolicy,
    /// Scored pairs between progress notifications while building the matrix.
    pub progress_interval: usize,
    /// Partner marker for unmatched rows.
    pub unmatched_label: String,
    /// Also append right-list items that were never matched.
    pub report_unmatched_right: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            policy: ScoringPolicy::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            unmatched_label: NO_MATCH_FOUND.to_string(),
            report_unmatched_right: false,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Replaces the threshold sweep. Order is normalized by [`Self::validate`].
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    #[must_use]
    pub fn with_unmatched_label(mut self, label: impl Into<String>) -> Self {
        self.unmatched_label = label.into();
        self
    }

    #[must_use]
    pub fn with_report_unmatched_right(mut self, enable: bool) -> Self {
        self.report_unmatched_right = enable;
        self
    }

    /// Checks ranges and returns a copy with thresholds sorted descending and
    /// deduplicated, so the strictest criterion always runs first.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidOptions`] when a score is outside
    /// `[0, 100]`, the progress interval is zero, or the sentinel is blank.
    pub fn validate(&self) -> Result<Self> {
        if !is_score(self.min_score) {
            return Err(MatchError::InvalidOptions(format!(
                "min_score must be within 0..=100, got {}",
                self.min_score
            )));
        }
        if let Some(bad) = self.thresholds.iter().find(|value| !is_score(**value)) {
            return Err(MatchError::InvalidOptions(format!(
                "thresholds must be within 0..=100, got {bad}"
            )));
        }
        if self.progress_interval == 0 {
            return Err(MatchError::InvalidOptions(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        if self.unmatched_label.trim().is_empty() {
            return Err(MatchError::InvalidOptions(
                "unmatched_label must not be blank".to_string(),
            ));
        }
        let mut thresholds = self.thresholds.clone();
        thresholds.sort_by(|a, b| b.total_cmp(a));
        thresholds.dedup();
        Ok(Self {
            thresholds,
            ..self.clone()
        })
    }
}

fn is_score(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_policy() {
        let options = MatchOptions::default();
        assert_eq!(options.min_score, 20.0);
        assert_eq!(options.thresholds, vec![100.0, 95.0]);
        assert_eq!(options.policy, ScoringPolicy::Weighted);
        assert_eq!(options.unmatched_label, "NO MATCH FOUND");
        assert!(!options.report_unmatched_right);
    }

    #[test]
    fn validate_sorts_thresholds_descending() {
        let options = MatchOptions::new()
            .with_thresholds(vec![90.0, 100.0, 95.0, 100.0])
            .validate()
            .unwrap();
        assert_eq!(options.thresholds, vec![100.0, 95.0, 90.0]);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(MatchOptions::new().with_min_score(-1.0).validate().is_err());
        assert!(MatchOptions::new().with_min_score(f64::NAN).validate().is_err());
        assert!(
            MatchOptions::new()
                .with_thresholds(vec![101.0])
                .validate()
                .is_err()
        );
        assert!(MatchOptions::new().with_progress_interval(0).validate().is_err());
        assert!(MatchOptions::new().with_unmatched_label("  ").validate().is_err());
    }

    #[test]
    fn empty_threshold_sweep_is_allowed() {
        let options = MatchOptions::new().with_thresholds(Vec::new()).validate();
        assert!(options.is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let options: MatchOptions =
            serde_json::from_str(r#"{"min_score": 35, "policy": "max-ratio"}"#).unwrap();
        assert_eq!(options.min_score, 35.0);
        assert_eq!(options.policy, ScoringPolicy::MaxRatio);
        assert_eq!(options.thresholds, vec![100.0, 95.0]);
        assert_eq!(options.progress_interval, 10);
    }
}
