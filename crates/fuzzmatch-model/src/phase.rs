//! Stages reported through progress callbacks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A long-running stage of a matching run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Scoring every left/right pair into the similarity matrix.
    Scoring,
    /// Greedy selection of the remaining best pairs.
    Assignment,
}

impl MatchPhase {
    /// Human-readable label shown next to progress indicators.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Scoring => "Calculating similarities",
            Self::Assignment => "Finding best matches",
        }
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scoring => f.write_str("scoring"),
            Self::Assignment => f.write_str("assignment"),
        }
    }
}
