mod console;
mod storage;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use echoes_game::{
    Archive, ContentLoader, Leader, PlayerRegistry, RegistryError, Session, randomized_order,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use console::{ConsoleUi, PlayMode, PostRound};
use storage::{FileArchiveStore, FilePlayerStore, FsContentLoader};

#[derive(Debug, Parser)]
#[command(name = "echoes", version)]
#[command(about = "Echoes of Command - a history quiz played from the terminal")]
struct Args {
    /// Path to the leader/level content file
    #[arg(long, default_value = "data/history.json")]
    content: PathBuf,

    /// Directory holding players.json and archive.json
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let loader = FsContentLoader::new(&args.content);
    let mut registry = PlayerRegistry::load(FilePlayerStore::new(args.data_dir.join("players.json")));
    let mut archive = Archive::load(FileArchiveStore::new(args.data_dir.join("archive.json")));
    let mut ui = ConsoleUi::stdin();

    let mut running = true;
    while running {
        ui.show_welcome();

        let Some(username) = register_player(&mut ui, &mut registry) else {
            break;
        };
        if let Some(player) = registry.get(&username) {
            ui.show_welcome_for_player(player);
        }

        let mut user_active = true;
        while user_active {
            ui.show_search_disabled_notice();
            let mode = ui.prompt_play_mode();
            if mode == PlayMode::Quit {
                user_active = false;
                running = false;
                continue;
            }

            let data = match loader.load_leaders() {
                Ok(data) => data,
                Err(e) => {
                    log::error!("could not load content from {}: {e}", args.content.display());
                    println!("Content file could not be loaded; nothing to play.");
                    continue;
                }
            };
            if data.leaders.is_empty() {
                println!("Content file has no leaders; nothing to play.");
                continue;
            }

            let Some(to_play) = pick_leaders(&mut ui, mode, &data.leaders) else {
                continue;
            };

            let player = registry
                .get_mut(&username)
                .context("registered player disappeared from the registry")?;
            Session::new(&to_play, &mut ui, player, &mut archive).run();
            registry.save();

            if ui.prompt_archive_search() {
                search_archive(&mut ui, &archive);
            }

            match ui.prompt_post_round() {
                PostRound::PlayAgain => {}
                PostRound::SwitchUser => user_active = false,
                PostRound::ViewStats => {
                    if let Some(player) = registry.get(&username) {
                        ui.show_player_stats(player);
                    }
                }
                PostRound::Quit => {
                    user_active = false;
                    running = false;
                }
            }
        }
        ui.show_leaderboard(&registry.leaderboard());
    }
    ui.show_goodbye();
    Ok(())
}

/// Re-prompt until an unused username registers, or input ends.
fn register_player<R: BufRead>(
    ui: &mut ConsoleUi<R>,
    registry: &mut PlayerRegistry<FilePlayerStore>,
) -> Option<String> {
    loop {
        let username = ui.prompt_username()?;
        match registry.register(&username, Utc::now().timestamp_millis()) {
            Ok(_) => return Some(username),
            Err(e @ RegistryError::DuplicateUsername(_)) => println!("{e}"),
        }
    }
}

/// Resolve the chosen play mode into the leader list for this round.
/// `None` means the selection was abandoned (end of input).
fn pick_leaders<R: BufRead>(
    ui: &mut ConsoleUi<R>,
    mode: PlayMode,
    leaders: &[Leader],
) -> Option<Vec<Leader>> {
    match mode {
        PlayMode::Single => ui.select_leader(leaders).map(|l| vec![l.clone()]),
        PlayMode::Sequential => Some(leaders.to_vec()),
        PlayMode::Randomized => {
            let seed: u64 = rand::random();
            log::info!("randomized mode seed: {seed}");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Some(randomized_order(leaders, &mut rng))
        }
        PlayMode::Quit => None,
    }
}

fn search_archive<R: BufRead, S: echoes_game::ArchiveStore>(
    ui: &mut ConsoleUi<R>,
    archive: &Archive<S>,
) {
    if archive.is_empty() {
        ui.show_empty_archive_notice();
        return;
    }
    let Some(keyword) = ui.prompt_search_keyword() else {
        return;
    };
    let results = archive.search(&keyword);
    if results.is_empty() {
        ui.show_no_search_results();
    } else {
        ui.show_search_results(&results);
    }
}
