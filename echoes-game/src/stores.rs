//! In-memory store implementations (useful for tests and ephemeral play).
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::archive::ArchiveEntry;
use crate::player::PlayerRecord;
use crate::{ArchiveStore, PlayerStore};

/// Error type for stores that cannot actually fail, and for the failing
/// doubles that always do.
#[derive(Debug, Error)]
#[error("store unavailable: {0}")]
pub struct StoreError(pub String);

/// Shared in-memory player store. Clones share the same backing map, so a
/// registry saved through one clone is visible to a registry loaded from
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlayerStore {
    records: Rc<RefCell<HashMap<String, PlayerRecord>>>,
}

impl PlayerStore for MemoryPlayerStore {
    type Error = StoreError;

    fn load(&self) -> Result<HashMap<String, PlayerRecord>, Self::Error> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &HashMap<String, PlayerRecord>) -> Result<(), Self::Error> {
        *self.records.borrow_mut() = records.clone();
        Ok(())
    }
}

/// Shared in-memory archive store.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchiveStore {
    entries: Rc<RefCell<Vec<ArchiveEntry>>>,
}

impl ArchiveStore for MemoryArchiveStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<ArchiveEntry>, Self::Error> {
        Ok(self.entries.borrow().clone())
    }

    fn save(&self, entries: &[ArchiveEntry]) -> Result<(), Self::Error> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}

/// Store double whose every operation fails, for exercising the
/// warn-and-continue persistence policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPlayerStore;

impl PlayerStore for FailingPlayerStore {
    type Error = StoreError;

    fn load(&self) -> Result<HashMap<String, PlayerRecord>, Self::Error> {
        Err(StoreError("player store offline".to_string()))
    }

    fn save(&self, _records: &HashMap<String, PlayerRecord>) -> Result<(), Self::Error> {
        Err(StoreError("player store offline".to_string()))
    }
}

/// Archive counterpart of [`FailingPlayerStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingArchiveStore;

impl ArchiveStore for FailingArchiveStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<ArchiveEntry>, Self::Error> {
        Err(StoreError("archive store offline".to_string()))
    }

    fn save(&self, _entries: &[ArchiveEntry]) -> Result<(), Self::Error> {
        Err(StoreError("archive store offline".to_string()))
    }
}
