//! Terminal progress bar for matching runs.

use std::time::Duration;

use fuzzmatch_map::Progress;
use fuzzmatch_model::MatchPhase;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} {msg:<26} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})";

/// Renders engine progress as one bar per phase on stderr.
pub struct BarProgress {
    bar: ProgressBar,
    phase: Option<MatchPhase>,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        Self { bar, phase: None }
    }

    /// A bar that never draws, for `--no-progress` and non-terminal runs.
    pub fn hidden() -> Self {
        let progress = Self::new();
        progress.bar.set_draw_target(ProgressDrawTarget::hidden());
        progress
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Position of the current phase.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn report(&mut self, completed: usize, total: usize, phase: MatchPhase) {
        if self.phase != Some(phase) {
            if self.phase.is_some() {
                self.bar.reset();
            } else {
                self.bar.enable_steady_tick(Duration::from_millis(100));
            }
            self.phase = Some(phase);
            self.bar.set_message(phase.label());
        }
        self.bar.set_length(total as u64);
        self.bar.set_position(completed as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_phase_changes() {
        let mut progress = BarProgress::hidden();
        progress.report(5, 10, MatchPhase::Scoring);
        assert_eq!(progress.position(), 5);
        progress.report(1, 3, MatchPhase::Assignment);
        assert_eq!(progress.phase, Some(MatchPhase::Assignment));
        assert_eq!(progress.position(), 1);
        progress.finish();
    }
}
