//! JSON-file implementations of the core persistence and content traits.
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use echoes_game::{ArchiveEntry, ArchiveStore, ContentData, ContentLoader, PlayerRecord, PlayerStore};
use thiserror::Error;

/// Errors from file-backed stores and the content loader.
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Player records persisted as a username -> record map in one JSON file.
#[derive(Debug, Clone)]
pub struct FilePlayerStore {
    path: PathBuf,
}

impl FilePlayerStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlayerStore for FilePlayerStore {
    type Error = FileStoreError;

    fn load(&self) -> Result<HashMap<String, PlayerRecord>, Self::Error> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, records: &HashMap<String, PlayerRecord>) -> Result<(), Self::Error> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Archive entries persisted as an ordered JSON array.
#[derive(Debug, Clone)]
pub struct FileArchiveStore {
    path: PathBuf,
}

impl FileArchiveStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArchiveStore for FileArchiveStore {
    type Error = FileStoreError;

    fn load(&self) -> Result<Vec<ArchiveEntry>, Self::Error> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, entries: &[ArchiveEntry]) -> Result<(), Self::Error> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Loads the leader/level content set from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FsContentLoader {
    path: PathBuf,
}

impl FsContentLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentLoader for FsContentLoader {
    type Error = FileStoreError;

    fn load_leaders(&self) -> Result<ContentData, Self::Error> {
        let json = fs::read_to_string(&self.path)?;
        Ok(ContentData::from_json(&json)?)
    }
}
