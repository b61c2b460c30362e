//! Similarity scoring and greedy one-to-one matching of two label lists.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`SimilarityScorer`] scores a pair of labels on a 0-100 scale.
//! 2. [`MatrixBuilder`] scores the full cross product of both lists.
//! 3. [`GreedyAssigner`] commits a one-to-one assignment in two passes.
//! 4. [`assemble`] ranks matches and appends unmatched labels.
//!
//! [`FuzzyMatcher`] wires the four stages together.
//!
//! # Example
//!
//! ```
//! use fuzzmatch_map::{FuzzyMatcher, MatchRequest, NoProgress};
//! use fuzzmatch_model::MatchOptions;
//!
//! let stores = vec!["Acme Corp".to_string()];
//! let customers = vec!["ACME CORP".to_string()];
//! let matcher = FuzzyMatcher::new(MatchOptions::default()).unwrap();
//! let outcome = matcher
//!     .run(&MatchRequest::new(&stores, &customers), &mut NoProgress)
//!     .unwrap();
//! assert_eq!(outcome.results.rows[0].score, 100.0);
//! ```

#![deny(unsafe_code)]

pub mod assemble;
pub mod assign;
pub mod engine;
pub mod matrix;
pub mod progress;
pub mod ratio;
pub mod score;

pub use assemble::assemble;
pub use assign::GreedyAssigner;
pub use engine::{FuzzyMatcher, MatchOutcome, MatchRequest};
pub use matrix::{MatrixBuilder, SimilarityMatrix};
pub use progress::{CancellationToken, NoProgress, Progress};
pub use score::{ScoreBreakdown, ScoreRule, Scorer, SimilarityScorer, SubScores};
