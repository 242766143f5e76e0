//! End-to-end round: registry, session engine, and archive working together.
use echoes_game::{
    Archive, Choice, ContentData, Leader, Level, LevelSelection, MemoryArchiveStore,
    MemoryPlayerStore, PlayerRegistry, RegistryError, ScriptedUi, Session,
};

fn content() -> ContentData {
    let level = |leader: &str, n: u32, desc: &str, correct: &str, wrong: &str, summary: &str| Level {
        number: n,
        leader_name: leader.to_string(),
        description: desc.to_string(),
        choices: vec![
            Choice {
                text: correct.to_string(),
                historical: true,
            },
            Choice {
                text: wrong.to_string(),
                historical: false,
            },
        ],
        summary: summary.to_string(),
    };

    ContentData::from_leaders(vec![
        Leader {
            name: "Hannibal".to_string(),
            backstory: "Carthaginian general".to_string(),
            levels: vec![
                level(
                    "Hannibal",
                    1,
                    "The Alps stand between you and Rome.",
                    "Cross with the elephants",
                    "Sail the fleet instead",
                    "The crossing cost half the army.",
                ),
                level(
                    "Hannibal",
                    2,
                    "Cannae: the legions advance.",
                    "Envelop with the crescent",
                    "Meet them head on",
                    "The double envelopment destroyed eight legions.",
                ),
                level(
                    "Hannibal",
                    3,
                    "Rome lies open after Cannae.",
                    "Hold back from the walls",
                    "March on Rome at once",
                    "He never besieged the city.",
                ),
            ],
        },
        Leader {
            name: "Zenobia".to_string(),
            backstory: "Queen of Palmyra".to_string(),
            levels: vec![
                level(
                    "Zenobia",
                    1,
                    "Egypt wavers under Roman rule.",
                    "Annex Egypt",
                    "Stay within Syria",
                    "Palmyra took Egypt in 270.",
                ),
                level(
                    "Zenobia",
                    2,
                    "Aurelian marches east.",
                    "Stand at Emesa",
                    "Surrender the east",
                    "The Palmyrene army broke at Emesa.",
                ),
            ],
        },
    ])
}

#[test]
fn alice_plays_one_leader_scores_one_of_three() {
    let data = content();
    let mut registry = PlayerRegistry::load(MemoryPlayerStore::default());
    let mut archive = Archive::load(MemoryArchiveStore::default());
    registry.register("Alice", 1_000).unwrap();

    let single = std::slice::from_ref(&data.leaders[0]);
    let mut ui = ScriptedUi::new([
        LevelSelection::First,  // correct
        LevelSelection::Second, // incorrect
        LevelSelection::Skip,   // no valid selection
    ]);
    let player = registry.get_mut("Alice").unwrap();
    let outcome = Session::new(single, &mut ui, player, &mut archive).run();
    registry.save();

    assert_eq!(outcome.score, 1);
    assert_eq!(outcome.total, 3);
    assert_eq!(archive.len(), 3);
    assert_eq!(registry.get("Alice").unwrap().best_single_score(), 1);
}

#[test]
fn sequential_round_feeds_leaderboard_and_archive_search() {
    let data = content();
    let player_store = MemoryPlayerStore::default();
    let mut registry = PlayerRegistry::load(player_store.clone());
    let mut archive = Archive::load(MemoryArchiveStore::default());

    registry.register("fast", 0).unwrap();
    registry.register("slow", 0).unwrap();

    for name in ["fast", "slow"] {
        let mut ui = ScriptedUi::new(std::iter::repeat_n(LevelSelection::First, 5));
        let player = registry.get_mut(name).unwrap();
        let outcome = Session::new(&data.leaders, &mut ui, player, &mut archive).run();
        assert!(outcome.sequential);
        assert_eq!(outcome.score, 5);
        registry.save();
    }

    // Same score for both; the leaderboard breaks the tie on time, and both
    // records appear exactly once.
    let board = registry.leaderboard();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].best_score(), 5);
    assert!(board[0].best_time_ms() <= board[1].best_time_ms());

    // Ten entries, searchable on leader name or description.
    assert_eq!(archive.len(), 10);
    assert_eq!(archive.search("zenobia").len(), 4);
    assert_eq!(archive.search("THE ALPS").len(), 2);
    assert!(archive.search("gettysburg").is_empty());

    // Durable through the shared store.
    let reloaded = PlayerRegistry::load(player_store);
    assert_eq!(reloaded.get("fast").unwrap().best_sequential_score(), 5);
}

#[test]
fn duplicate_registration_is_rejected_after_play() {
    let mut registry = PlayerRegistry::load(MemoryPlayerStore::default());
    registry.register("Alice", 1_000).unwrap();
    registry
        .get_mut("Alice")
        .unwrap()
        .record_session(3, 2_000, false);

    let err = registry.register("Alice", 2_000).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateUsername(_)));
    assert_eq!(registry.get("Alice").unwrap().best_single_score(), 3);
}
