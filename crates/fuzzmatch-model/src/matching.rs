//! Committed pairings produced by the assignment engine.

use serde::{Deserialize, Serialize};

/// Which pass of the assignment engine committed a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pass", rename_all = "snake_case")]
pub enum MatchPass {
    /// First-fit sweep at the given threshold.
    Threshold { threshold: f64 },
    /// Global best-remaining-pair selection.
    Greedy,
}

/// A committed pairing of one left item with one right item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Position in the left list.
    pub left: usize,
    /// Position in the right list.
    pub right: usize,
    /// Similarity score in `[0, 100]`.
    pub score: f64,
    /// Pass that committed this pairing.
    pub pass: MatchPass,
}

/// Outcome of running the assignment engine over a similarity matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Matches in the order they were committed.
    pub matches: Vec<Match>,
    /// Left positions that were never matched, ascending.
    pub unmatched_left: Vec<usize>,
    /// Right positions that were never matched, ascending.
    pub unmatched_right: Vec<usize>,
}

impl Assignment {
    /// Number of matches with a perfect score.
    #[must_use]
    pub fn perfect_count(&self) -> usize {
        self.matches.iter().filter(|m| m.score >= 100.0).count()
    }

    /// Number of matches committed by the threshold sweep.
    #[must_use]
    pub fn threshold_count(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| matches!(m.pass, MatchPass::Threshold { .. }))
            .count()
    }

    /// Mean score of the committed matches, if any.
    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        if self.matches.is_empty() {
            return None;
        }
        let sum: f64 = self.matches.iter().map(|m| m.score).sum();
        Some(sum / self.matches.len() as f64)
    }
}
