//! Interaction-surface contract between the session engine and a frontend.
use std::collections::VecDeque;

use crate::data::Level;

/// Outcome of collecting one level's input. Timeouts and invalid input both
/// map to [`LevelSelection::Skip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSelection {
    First,
    Second,
    Skip,
}

impl LevelSelection {
    /// Zero-based choice index, `None` for a skip.
    #[must_use]
    pub const fn choice_index(self) -> Option<usize> {
        match self {
            Self::First => Some(0),
            Self::Second => Some(1),
            Self::Skip => None,
        }
    }
}

/// What the session engine needs from a frontend. The engine calls these
/// synchronously and blocks until each returns.
pub trait SessionUi {
    /// Announce the current leader in an all-leaders session.
    fn show_leader_sequence(&mut self, leader_name: &str, index: usize, total: usize);

    /// Present a level and its choices.
    fn show_level(&mut self, level: &Level);

    /// Collect the player's selection for the level just shown.
    fn player_choice(&mut self) -> LevelSelection;

    /// Report whether the selection matched history, with the level summary.
    fn show_result(&mut self, correct: bool, summary: &str);

    /// Report that the level was skipped without a valid selection.
    fn show_timeout_skip(&mut self);

    /// Report the running score against the session's total level count.
    fn show_progress(&mut self, score: u32, total: u32);

    /// Report the final score, total, and elapsed wall-clock time.
    fn show_round_complete(&mut self, score: u32, total: u32, elapsed_ms: u64);
}

/// Test double that answers levels from a pre-scripted queue and records the
/// feedback it was shown. Once the script runs out it skips every level.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    answers: VecDeque<LevelSelection>,
    pub levels_shown: Vec<String>,
    pub results: Vec<bool>,
    pub skips: u32,
    pub progress: Vec<(u32, u32)>,
    pub round_complete: Option<(u32, u32, u64)>,
}

impl ScriptedUi {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = LevelSelection>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl SessionUi for ScriptedUi {
    fn show_leader_sequence(&mut self, _leader_name: &str, _index: usize, _total: usize) {}

    fn show_level(&mut self, level: &Level) {
        self.levels_shown.push(level.description.clone());
    }

    fn player_choice(&mut self) -> LevelSelection {
        self.answers.pop_front().unwrap_or(LevelSelection::Skip)
    }

    fn show_result(&mut self, correct: bool, _summary: &str) {
        self.results.push(correct);
    }

    fn show_timeout_skip(&mut self) {
        self.skips += 1;
    }

    fn show_progress(&mut self, score: u32, total: u32) {
        self.progress.push((score, total));
    }

    fn show_round_complete(&mut self, score: u32, total: u32, elapsed_ms: u64) {
        self.round_complete = Some((score, total, elapsed_ms));
    }
}
