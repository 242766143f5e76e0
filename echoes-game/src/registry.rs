//! Player registry: unique registration, logins, and the leaderboard.
use std::collections::HashMap;

use thiserror::Error;

use crate::PlayerStore;
use crate::player::PlayerRecord;

/// Errors surfaced by registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("username '{0}' already exists, please choose another one")]
    DuplicateUsername(String),
}

/// Username -> record mapping backed by a storage collaborator. Existing
/// records are never overwritten by registration.
#[derive(Debug)]
pub struct PlayerRegistry<S: PlayerStore> {
    records: HashMap<String, PlayerRecord>,
    store: S,
}

impl<S: PlayerStore> PlayerRegistry<S> {
    /// Load the registry through the store. A load failure is downgraded to
    /// an empty registry; state is best-effort durable, not strictly so.
    pub fn load(store: S) -> Self {
        let records = match store.load() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("could not load player records, starting empty: {e}");
                HashMap::new()
            }
        };
        Self { records, store }
    }

    /// Register a new username, stamping its first login.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateUsername`] when the name is taken;
    /// the existing record is left untouched.
    pub fn register(
        &mut self,
        username: &str,
        login_ts_ms: i64,
    ) -> Result<&PlayerRecord, RegistryError> {
        if self.records.contains_key(username) {
            return Err(RegistryError::DuplicateUsername(username.to_string()));
        }
        let mut record = PlayerRecord::new(username);
        record.record_login(login_ts_ms);
        self.records.insert(username.to_string(), record);
        self.save();
        Ok(&self.records[username])
    }

    /// Get-or-create login: returns the existing record for `username` or
    /// creates one, stamping the login either way.
    pub fn login(&mut self, username: &str, login_ts_ms: i64) -> &PlayerRecord {
        self.records
            .entry(username.to_string())
            .or_insert_with(|| PlayerRecord::new(username))
            .record_login(login_ts_ms);
        self.save();
        &self.records[username]
    }

    #[must_use]
    pub fn get(&self, username: &str) -> Option<&PlayerRecord> {
        self.records.get(username)
    }

    pub fn get_mut(&mut self, username: &str) -> Option<&mut PlayerRecord> {
        self.records.get_mut(username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Save through the store. Failures are reported and swallowed.
    pub fn save(&self) {
        if let Err(e) = self.store.save(&self.records) {
            log::warn!("failed to save player records: {e}");
        }
    }

    /// All records ordered by best score descending, ties broken by best
    /// time ascending. Total: every record appears exactly once.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<&PlayerRecord> {
        let mut list: Vec<&PlayerRecord> = self.records.values().collect();
        list.sort_by(|a, b| {
            b.best_score()
                .cmp(&a.best_score())
                .then_with(|| a.best_time_ms().cmp(&b.best_time_ms()))
        });
        list
    }
}
