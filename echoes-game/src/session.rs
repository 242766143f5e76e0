//! The session engine: drives leader/level iteration and scoring.
use std::time::Instant;

use crate::ArchiveStore;
use crate::archive::Archive;
use crate::data::Leader;
use crate::player::PlayerRecord;
use crate::ui::{LevelSelection, SessionUi};

/// Final tally of one play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub score: u32,
    pub total: u32,
    pub elapsed_ms: u64,
    pub sequential: bool,
}

/// One full play-through of one or more leaders by one player.
///
/// Mode is derived, not passed in: more than one leader means sequential
/// mode. Elapsed time is a single wall-clock span over the whole session.
pub struct Session<'a, U: SessionUi, S: ArchiveStore> {
    leaders: &'a [Leader],
    ui: &'a mut U,
    player: &'a mut PlayerRecord,
    archive: &'a mut Archive<S>,
}

impl<'a, U: SessionUi, S: ArchiveStore> Session<'a, U, S> {
    pub fn new(
        leaders: &'a [Leader],
        ui: &'a mut U,
        player: &'a mut PlayerRecord,
        archive: &'a mut Archive<S>,
    ) -> Self {
        Self {
            leaders,
            ui,
            player,
            archive,
        }
    }

    /// Play every level of every leader in order, then record the result
    /// against the player's matching mode slot.
    pub fn run(self) -> SessionOutcome {
        let sequential = self.leaders.len() > 1;
        let start = Instant::now();

        let leader_total = self.leaders.len();
        let total =
            u32::try_from(self.leaders.iter().map(|l| l.levels.len()).sum::<usize>())
                .unwrap_or(u32::MAX);
        let mut score: u32 = 0;

        for (leader_index, leader) in self.leaders.iter().enumerate() {
            if sequential {
                self.ui
                    .show_leader_sequence(&leader.name, leader_index + 1, leader_total);
            }
            for level in &leader.levels {
                self.ui.show_level(level);
                match self.ui.player_choice().choice_index() {
                    Some(index) => {
                        let correct = level.is_historical(index);
                        if correct {
                            score += 1;
                        }
                        self.ui.show_result(correct, &level.summary);
                    }
                    None => self.ui.show_timeout_skip(),
                }
                // Every outcome leaves a durable trace, valid answer or not.
                self.archive.append(&leader.name, level);
                self.archive.persist();
                self.ui.show_progress(score, total);
            }
        }

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.ui.show_round_complete(score, total, elapsed_ms);
        self.player.record_session(score, elapsed_ms, sequential);
        self.player.update_statistics(total, score, elapsed_ms);

        SessionOutcome {
            score,
            total,
            elapsed_ms,
            sequential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Choice, Level};
    use crate::stores::MemoryArchiveStore;
    use crate::ui::ScriptedUi;

    fn leader(name: &str, level_count: u32) -> Leader {
        let levels = (1..=level_count)
            .map(|n| Level {
                number: n,
                leader_name: name.to_string(),
                description: format!("{name} faces decision {n}"),
                choices: vec![
                    Choice {
                        text: "The recorded path".to_string(),
                        historical: true,
                    },
                    Choice {
                        text: "The counterfactual".to_string(),
                        historical: false,
                    },
                ],
                summary: format!("What really happened in {n}"),
            })
            .collect();
        Leader {
            name: name.to_string(),
            backstory: String::new(),
            levels,
        }
    }

    #[test]
    fn correct_incorrect_skip_scores_one_of_three() {
        let leaders = vec![leader("Alice's Leader", 3)];
        let mut ui = ScriptedUi::new([
            LevelSelection::First,
            LevelSelection::Second,
            LevelSelection::Skip,
        ]);
        let mut player = PlayerRecord::new("alice");
        let mut archive = Archive::load(MemoryArchiveStore::default());

        let outcome = Session::new(&leaders, &mut ui, &mut player, &mut archive).run();

        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total, 3);
        assert!(!outcome.sequential);
        assert_eq!(archive.len(), 3);
        assert_eq!(player.best_single_score(), 1);
        assert_eq!(ui.results, vec![true, false]);
        assert_eq!(ui.skips, 1);
        assert_eq!(ui.round_complete.map(|(s, t, _)| (s, t)), Some((1, 3)));
    }

    #[test]
    fn single_leader_records_single_mode() {
        let leaders = vec![leader("Solo", 2)];
        let mut ui = ScriptedUi::new([LevelSelection::First, LevelSelection::First]);
        let mut player = PlayerRecord::new("bob");
        let mut archive = Archive::load(MemoryArchiveStore::default());

        let outcome = Session::new(&leaders, &mut ui, &mut player, &mut archive).run();

        assert!(!outcome.sequential);
        assert_eq!(player.best_single_score(), 2);
        assert_eq!(player.best_sequential_score(), 0);
    }

    #[test]
    fn multiple_leaders_infer_sequential_mode() {
        let leaders = vec![leader("One", 2), leader("Two", 2)];
        let mut ui = ScriptedUi::new([
            LevelSelection::First,
            LevelSelection::First,
            LevelSelection::First,
            LevelSelection::Second,
        ]);
        let mut player = PlayerRecord::new("carol");
        let mut archive = Archive::load(MemoryArchiveStore::default());

        let outcome = Session::new(&leaders, &mut ui, &mut player, &mut archive).run();

        assert!(outcome.sequential);
        assert_eq!(outcome.total, 4);
        assert_eq!(outcome.score, 3);
        assert_eq!(player.best_sequential_score(), 3);
        assert_eq!(player.best_single_score(), 0);
    }

    #[test]
    fn total_counts_levels_across_all_leaders() {
        let leaders = vec![leader("One", 3), leader("Two", 1)];
        let mut ui = ScriptedUi::default();
        let mut player = PlayerRecord::new("dave");
        let mut archive = Archive::load(MemoryArchiveStore::default());

        let outcome = Session::new(&leaders, &mut ui, &mut player, &mut archive).run();

        assert_eq!(outcome.total, 4);
        assert_eq!(outcome.score, 0);
        assert_eq!(ui.skips, 4);
        assert_eq!(archive.len(), 4);
        assert_eq!(ui.progress.last(), Some(&(0, 4)));
    }

    #[test]
    fn malformed_level_with_no_correct_choice_never_panics() {
        let mut bad = leader("Broken", 1);
        for choice in &mut bad.levels[0].choices {
            choice.historical = false;
        }
        let leaders = vec![bad];
        let mut ui = ScriptedUi::new([LevelSelection::First]);
        let mut player = PlayerRecord::new("erin");
        let mut archive = Archive::load(MemoryArchiveStore::default());

        let outcome = Session::new(&leaders, &mut ui, &mut player, &mut archive).run();

        assert_eq!(outcome.score, 0);
        assert_eq!(archive.entries()[0].historical_choice, "");
    }

    #[test]
    fn one_choice_level_treats_missing_second_option_as_incorrect() {
        let mut short = leader("Short", 1);
        short.levels[0].choices.truncate(1);
        let leaders = vec![short];
        let mut ui = ScriptedUi::new([LevelSelection::Second]);
        let mut player = PlayerRecord::new("fred");
        let mut archive = Archive::load(MemoryArchiveStore::default());

        let outcome = Session::new(&leaders, &mut ui, &mut player, &mut archive).run();

        assert_eq!(outcome.score, 0);
        assert_eq!(ui.results, vec![false]);
    }

    #[test]
    fn statistics_reflect_session_totals() {
        let leaders = vec![leader("Solo", 3)];
        let mut ui = ScriptedUi::new([
            LevelSelection::First,
            LevelSelection::First,
            LevelSelection::Skip,
        ]);
        let mut player = PlayerRecord::new("gina");
        let mut archive = Archive::load(MemoryArchiveStore::default());

        Session::new(&leaders, &mut ui, &mut player, &mut archive).run();

        assert_eq!(player.total_levels_played(), 3);
        assert_eq!(player.total_correct_choices(), 2);
    }
}
