//! Terminal frontend: session UI implementation plus the menu prompts.
use std::io::{self, BufRead, BufReader, Stdin, Write};

use chrono::{Local, TimeZone};
use colored::Colorize;
use echoes_game::{Leader, Level, LevelSelection, PlayerRecord, SessionUi};

/// How the player wants to play this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// One leader, chosen from the roster.
    Single,
    /// Every leader in content order.
    Sequential,
    /// Every leader with level and choice order shuffled.
    Randomized,
    Quit,
}

/// Post-round menu outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRound {
    PlayAgain,
    SwitchUser,
    ViewStats,
    Quit,
}

/// Invalid level input re-prompts this many extra times before mapping to
/// a skip.
const CHOICE_RETRIES: u32 = 2;

/// Console implementation of the interaction surface. Input is injectable
/// so menu parsing is testable without a terminal.
pub struct ConsoleUi<R: BufRead> {
    input: R,
}

impl ConsoleUi<BufReader<Stdin>> {
    #[must_use]
    pub fn stdin() -> Self {
        Self {
            input: BufReader::new(io::stdin()),
        }
    }
}

impl<R: BufRead> ConsoleUi<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// One trimmed input line, or `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{text}");
        let _ = io::stdout().flush();
        self.read_line()
    }

    pub fn show_welcome(&mut self) {
        println!("{}", "=== Echoes of Command ===".bold());
    }

    /// Prompt until a non-empty `[A-Za-z0-9_]+` username arrives. `None`
    /// means input ended first.
    pub fn prompt_username(&mut self) -> Option<String> {
        loop {
            let username = self.prompt("Enter your username: ")?;
            if username.is_empty() {
                println!("{}", "Error: Username cannot be empty.".red());
            } else if !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                println!(
                    "{}",
                    "Error: Username can only contain letters, numbers, or underscores.".red()
                );
            } else {
                return Some(username);
            }
        }
    }

    pub fn show_welcome_for_player(&mut self, player: &PlayerRecord) {
        println!();
        match player.last_login() {
            None => println!(
                "Welcome, {}! You're new to Echoes of Command!",
                player.username.bold()
            ),
            Some(ts) => println!(
                "Welcome back, {}! Last login: {}",
                player.username.bold(),
                format_timestamp(ts)
            ),
        }
        if self.prompt_yes_no("View login history? (yes/no): ") {
            self.show_login_history(player);
        }
    }

    pub fn show_login_history(&mut self, player: &PlayerRecord) {
        println!("\n=== Login History for {} ===", player.username);
        let history = player.login_history();
        if history.is_empty() {
            println!("No login history available.");
        } else {
            for (i, ts) in history.iter().enumerate() {
                println!("{}) {}", i + 1, format_timestamp(*ts));
            }
        }
    }

    pub fn show_search_disabled_notice(&mut self) {
        println!("[Note] Archive-search disabled until after play.");
    }

    pub fn prompt_play_mode(&mut self) -> PlayMode {
        println!("\nHow do you want to play?");
        println!("  1) Play ONE leader");
        println!("  2) Play ALL leaders in sequence");
        println!("  3) Play ALL leaders with randomized levels and choices");
        println!("  4) Quit");
        let mut text = "Enter choice (1, 2, 3, or 4): ".to_string();
        loop {
            let Some(line) = self.prompt(&text) else {
                return PlayMode::Quit;
            };
            match line.parse::<u32>() {
                Ok(1) => return PlayMode::Single,
                Ok(2) => return PlayMode::Sequential,
                Ok(3) => return PlayMode::Randomized,
                Ok(4) => return PlayMode::Quit,
                _ => text = "Invalid. Please enter 1, 2, 3, or 4: ".to_string(),
            }
        }
    }

    /// Pick one leader from the roster, presented sorted by name. `None`
    /// only at end of input.
    pub fn select_leader<'a>(&mut self, leaders: &'a [Leader]) -> Option<&'a Leader> {
        let mut sorted: Vec<&Leader> = leaders.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        println!("\n=== Select a Leader ===");
        for (i, leader) in sorted.iter().enumerate() {
            println!("  {}) {}  -  {}", i + 1, leader.name.bold(), leader.backstory);
        }
        let mut text = format!("Enter your choice (1-{}): ", sorted.len());
        loop {
            let line = self.prompt(&text)?;
            if let Ok(choice) = line.parse::<usize>()
                && (1..=sorted.len()).contains(&choice)
            {
                let selected = sorted[choice - 1];
                println!("You chose \"{}\"\n", selected.name);
                return Some(selected);
            }
            text = "Invalid. Please enter a valid number: ".to_string();
        }
    }

    pub fn prompt_archive_search(&mut self) -> bool {
        self.prompt_yes_no("Search your archive now? (yes/no): ")
    }

    pub fn prompt_search_keyword(&mut self) -> Option<String> {
        self.prompt("Enter keyword to search: ")
    }

    pub fn show_search_results(&mut self, results: &[&echoes_game::ArchiveEntry]) {
        println!("\n=== Archive Search Results ===");
        for entry in results {
            println!("Leader: {}", entry.leader);
            println!("Level {}: {}", entry.level_number, entry.description);
            println!("Historical Decision: {}", entry.historical_choice);
            println!("Summary: {}\n", entry.summary);
        }
    }

    pub fn show_empty_archive_notice(&mut self) {
        println!("[Your archive is empty. Complete levels to build your archive!]");
    }

    pub fn show_no_search_results(&mut self) {
        println!("[No results found. Try a different keyword or play more levels.]");
    }

    pub fn prompt_post_round(&mut self) -> PostRound {
        println!("\nWhat next?");
        println!("  1) Play again");
        println!("  2) Switch user");
        println!("  3) View player statistics");
        println!("  4) Quit");
        let mut text = "Enter choice (1-4): ".to_string();
        loop {
            let Some(line) = self.prompt(&text) else {
                return PostRound::Quit;
            };
            match line.parse::<u32>() {
                Ok(1) => return PostRound::PlayAgain,
                Ok(2) => return PostRound::SwitchUser,
                Ok(3) => return PostRound::ViewStats,
                Ok(4) => return PostRound::Quit,
                _ => text = "Invalid. Please enter 1, 2, 3, or 4: ".to_string(),
            }
        }
    }

    pub fn show_player_stats(&mut self, player: &PlayerRecord) {
        println!("\n=== Player Statistics for {} ===", player.username);
        println!("Total Levels Played: {}", player.total_levels_played());
        println!("Accuracy: {:.2}%", player.accuracy());
        println!(
            "Average Time per Level: {:.2} seconds",
            player.average_time_per_level_secs()
        );
    }

    pub fn show_leaderboard(&mut self, records: &[&PlayerRecord]) {
        println!("\n{}", "=== Single-Leader Best Scores ===".bold());
        println!("{:<15}  {:<5}  {:<7}", "Player", "Score", "Time(s)");
        for record in records {
            if record.best_single_score() > 0 {
                println!(
                    "{:<15}  {:<5}  {:<7.2}",
                    record.username,
                    record.best_single_score(),
                    millis_to_secs(record.best_single_time_ms())
                );
            }
        }

        println!("\n{}", "=== Sequential (All Leaders) Best Scores ===".bold());
        println!("{:<15}  {:<5}  {:<7}", "Player", "Score", "Time(s)");
        for record in records {
            if record.best_sequential_score() > 0 {
                println!(
                    "{:<15}  {:<5}  {:<7.2}",
                    record.username,
                    record.best_sequential_score(),
                    millis_to_secs(record.best_sequential_time_ms())
                );
            }
        }
    }

    pub fn show_goodbye(&mut self) {
        println!("\nThanks for playing!");
    }

    fn prompt_yes_no(&mut self, text: &str) -> bool {
        self.prompt(text)
            .is_some_and(|line| line.eq_ignore_ascii_case("yes"))
    }
}

impl<R: BufRead> SessionUi for ConsoleUi<R> {
    fn show_leader_sequence(&mut self, leader_name: &str, index: usize, total: usize) {
        println!("\n=== Leader {index} of {total}: {leader_name} ===");
    }

    fn show_level(&mut self, level: &Level) {
        println!(
            "\n--- Level {} (Leader: {}) ---",
            level.number, level.leader_name
        );
        println!("{}", level.description);
        for (i, choice) in level.choices.iter().enumerate() {
            println!("{}) {}", i + 1, choice.text);
        }
    }

    fn player_choice(&mut self) -> LevelSelection {
        let mut text = "Your choice (1 or 2): ".to_string();
        for _ in 0..=CHOICE_RETRIES {
            let Some(line) = self.prompt(&text) else {
                return LevelSelection::Skip;
            };
            match line.parse::<u32>() {
                Ok(1) => return LevelSelection::First,
                Ok(2) => return LevelSelection::Second,
                _ => text = "Invalid. Please enter 1 or 2: ".to_string(),
            }
        }
        LevelSelection::Skip
    }

    fn show_result(&mut self, correct: bool, summary: &str) {
        if correct {
            println!("{}", "Correct!".green().bold());
        } else {
            println!("{}", "Incorrect".red().bold());
        }
        println!("{summary}");
    }

    fn show_timeout_skip(&mut self) {
        println!("{}", "[No valid input - skipping level]".yellow());
    }

    fn show_progress(&mut self, score: u32, total: u32) {
        println!("Progress: {score}/{total}");
    }

    fn show_round_complete(&mut self, score: u32, total: u32, elapsed_ms: u64) {
        println!("\n{}", "=== Round Complete ===".bold());
        println!("Score: {score} out of {total}");
        println!("Total Time: {:.2} seconds", millis_to_secs(elapsed_ms));
    }
}

fn format_timestamp(ts_ms: i64) -> String {
    Local
        .timestamp_millis_opt(ts_ms)
        .single()
        .map_or_else(|| "unknown".to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[allow(clippy::cast_precision_loss)]
fn millis_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
