use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// One answer option within a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub historical: bool,
}

/// A single question unit inside a leader's campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    #[serde(default)]
    pub leader_name: String,
    pub description: String,
    /// Content files carry exactly two choices per level; the engine reads
    /// them defensively and never assumes the invariant holds.
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub summary: String,
}

impl Level {
    /// Text of the historically accurate choice, or an empty string when the
    /// content flags none of them.
    #[must_use]
    pub fn historical_choice_text(&self) -> String {
        self.choices
            .iter()
            .find(|c| c.historical)
            .map(|c| c.text.clone())
            .unwrap_or_default()
    }

    /// Whether picking choice `index` (zero-based) matches history.
    /// Out-of-range indexes count as incorrect rather than panicking.
    #[must_use]
    pub fn is_historical(&self, index: usize) -> bool {
        self.choices.get(index).is_some_and(|c| c.historical)
    }
}

/// A quiz topic: one leader with an ordered run of levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    #[serde(default)]
    pub backstory: String,
    #[serde(default)]
    pub levels: Vec<Level>,
}

/// Container for all loaded content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentData {
    pub leaders: Vec<Leader>,
}

impl ContentData {
    /// Create empty content data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            leaders: Vec::new(),
        }
    }

    /// Load content data from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid content data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create content data from pre-built leaders
    #[must_use]
    pub fn from_leaders(leaders: Vec<Leader>) -> Self {
        Self { leaders }
    }

    /// Total level count across all leaders.
    #[must_use]
    pub fn total_levels(&self) -> usize {
        self.leaders.iter().map(|l| l.levels.len()).sum()
    }
}

/// Clone a leader list with level order and per-level choice order shuffled,
/// for the randomized all-leaders play mode. Level numbers keep their
/// original values so archive entries still name the source level.
#[must_use]
pub fn randomized_order<R: Rng>(leaders: &[Leader], rng: &mut R) -> Vec<Leader> {
    leaders
        .iter()
        .map(|leader| {
            let mut levels = leader.levels.clone();
            levels.shuffle(rng);
            for level in &mut levels {
                level.choices.shuffle(rng);
            }
            Leader {
                name: leader.name.clone(),
                backstory: leader.backstory.clone(),
                levels,
            }
        })
        .collect()
}
