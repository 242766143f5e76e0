//! Append-only archive of played levels with keyword search.
use serde::{Deserialize, Serialize};

use crate::ArchiveStore;
use crate::data::Level;

/// One durable record of a played level. Never edited or removed once
/// appended; insertion order is the only temporal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub leader: String,
    pub level_number: u32,
    pub description: String,
    pub historical_choice: String,
    pub summary: String,
}

/// The play-history log, backed by a storage collaborator.
#[derive(Debug)]
pub struct Archive<S: ArchiveStore> {
    entries: Vec<ArchiveEntry>,
    store: S,
}

impl<S: ArchiveStore> Archive<S> {
    /// Load the archive through the store. A load failure is downgraded to
    /// an empty archive so a missing or corrupt file never blocks play.
    pub fn load(store: S) -> Self {
        let entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("could not load archive, starting empty: {e}");
                Vec::new()
            }
        };
        Self { entries, store }
    }

    /// Append one entry for a played level. A level with no flagged choice
    /// archives an empty historical-decision text rather than failing.
    pub fn append(&mut self, leader_name: &str, level: &Level) {
        self.entries.push(ArchiveEntry {
            leader: leader_name.to_string(),
            level_number: level.number,
            description: level.description.clone(),
            historical_choice: level.historical_choice_text(),
            summary: level.summary.clone(),
        });
    }

    /// Save through the store. Failures are reported and swallowed; the
    /// session keeps running on a stale file.
    pub fn persist(&self) {
        if let Err(e) = self.store.save(&self.entries) {
            log::warn!("failed to save archive: {e}");
        }
    }

    /// Case-insensitive substring search over leader name and description,
    /// in insertion order.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<&ArchiveEntry> {
        let keyword = keyword.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.description.to_lowercase().contains(&keyword)
                    || e.leader.to_lowercase().contains(&keyword)
            })
            .collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
