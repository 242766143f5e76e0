//! Per-player best-result bookkeeping across both play modes.
use serde::{Deserialize, Serialize};

const fn max_time() -> u64 {
    u64::MAX
}

/// A player's durable record: best score/time per mode, login history, and
/// lifetime statistics. Best times start at `u64::MAX` so any completed
/// session beats the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub username: String,
    #[serde(default)]
    best_single_score: u32,
    #[serde(default = "max_time")]
    best_single_time_ms: u64,
    #[serde(default)]
    best_sequential_score: u32,
    #[serde(default = "max_time")]
    best_sequential_time_ms: u64,
    #[serde(default)]
    login_history: Vec<i64>,
    #[serde(default)]
    total_levels_played: u32,
    #[serde(default)]
    total_correct_choices: u32,
    #[serde(default)]
    total_time_ms: u64,
}

impl PlayerRecord {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            best_single_score: 0,
            best_single_time_ms: u64::MAX,
            best_sequential_score: 0,
            best_sequential_time_ms: u64::MAX,
            login_history: Vec::new(),
            total_levels_played: 0,
            total_correct_choices: 0,
            total_time_ms: 0,
        }
    }

    /// Record a completed session against the matching mode slot.
    ///
    /// The stored pair is replaced iff the new score is strictly higher, or
    /// equal with a strictly faster time. Equivalent to maximizing
    /// (score desc, time asc) over every session ever recorded, applied
    /// incrementally.
    pub fn record_session(&mut self, score: u32, time_ms: u64, sequential: bool) {
        let (best_score, best_time) = if sequential {
            (
                &mut self.best_sequential_score,
                &mut self.best_sequential_time_ms,
            )
        } else {
            (&mut self.best_single_score, &mut self.best_single_time_ms)
        };
        if score > *best_score || (score == *best_score && time_ms < *best_time) {
            *best_score = score;
            *best_time = time_ms;
        }
    }

    /// Append a login timestamp (milliseconds since the Unix epoch).
    pub fn record_login(&mut self, timestamp_ms: i64) {
        self.login_history.push(timestamp_ms);
    }

    /// Accumulate lifetime statistics after a session.
    pub fn update_statistics(&mut self, levels_played: u32, correct_choices: u32, time_ms: u64) {
        self.total_levels_played += levels_played;
        self.total_correct_choices += correct_choices;
        self.total_time_ms += time_ms;
    }

    #[must_use]
    pub fn login_history(&self) -> &[i64] {
        &self.login_history
    }

    /// Most recent login timestamp, if any.
    #[must_use]
    pub fn last_login(&self) -> Option<i64> {
        self.login_history.last().copied()
    }

    #[must_use]
    pub const fn best_single_score(&self) -> u32 {
        self.best_single_score
    }

    #[must_use]
    pub const fn best_single_time_ms(&self) -> u64 {
        self.best_single_time_ms
    }

    #[must_use]
    pub const fn best_sequential_score(&self) -> u32 {
        self.best_sequential_score
    }

    #[must_use]
    pub const fn best_sequential_time_ms(&self) -> u64 {
        self.best_sequential_time_ms
    }

    /// Overall best score across both modes.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_single_score.max(self.best_sequential_score)
    }

    /// Best time for whichever mode achieved `best_score`. When the mode
    /// scores tie, the faster of the two stored times wins.
    #[must_use]
    pub fn best_time_ms(&self) -> u64 {
        if self.best_sequential_score > self.best_single_score {
            self.best_sequential_time_ms
        } else if self.best_sequential_score < self.best_single_score {
            self.best_single_time_ms
        } else {
            self.best_sequential_time_ms.min(self.best_single_time_ms)
        }
    }

    #[must_use]
    pub const fn total_levels_played(&self) -> u32 {
        self.total_levels_played
    }

    #[must_use]
    pub const fn total_correct_choices(&self) -> u32 {
        self.total_correct_choices
    }

    #[must_use]
    pub const fn total_time_ms(&self) -> u64 {
        self.total_time_ms
    }

    /// Lifetime accuracy as a percentage, 0.0 before any level is played.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_levels_played == 0 {
            return 0.0;
        }
        f64::from(self.total_correct_choices) / f64::from(self.total_levels_played) * 100.0
    }

    /// Average seconds spent per level, 0.0 before any level is played.
    #[must_use]
    pub fn average_time_per_level_secs(&self) -> f64 {
        if self.total_levels_played == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let total_secs = self.total_time_ms as f64 / 1000.0;
        total_secs / f64::from(self.total_levels_played)
    }
}
