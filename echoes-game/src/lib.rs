//! Echoes of Command Game Engine
//!
//! Platform-agnostic core logic for the Echoes of Command history quiz.
//! This crate provides the content model, session engine, archive, and
//! player bookkeeping without UI or platform-specific dependencies.

pub mod archive;
pub mod data;
pub mod player;
pub mod registry;
pub mod session;
pub mod stores;
pub mod ui;

use std::collections::HashMap;

// Re-export commonly used types
pub use archive::{Archive, ArchiveEntry};
pub use data::{Choice, ContentData, Leader, Level, randomized_order};
pub use player::PlayerRecord;
pub use registry::{PlayerRegistry, RegistryError};
pub use session::{Session, SessionOutcome};
pub use stores::{
    FailingArchiveStore, FailingPlayerStore, MemoryArchiveStore, MemoryPlayerStore, StoreError,
};
pub use ui::{LevelSelection, ScriptedUi, SessionUi};

/// Trait for abstracting content loading operations
/// Platform-specific implementations should provide this
pub trait ContentLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full leader/level content set from the platform source
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be loaded or parsed.
    fn load_leaders(&self) -> Result<ContentData, Self::Error>;
}

/// Trait for abstracting player-record persistence
/// Platform-specific implementations should provide this
pub trait PlayerStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load all player records
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be loaded.
    fn load(&self) -> Result<HashMap<String, PlayerRecord>, Self::Error>;

    /// Save all player records
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be saved.
    fn save(&self, records: &HashMap<String, PlayerRecord>) -> Result<(), Self::Error>;
}

/// Trait for abstracting archive persistence
/// Platform-specific implementations should provide this
pub trait ArchiveStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the archived play history
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be loaded.
    fn load(&self) -> Result<Vec<ArchiveEntry>, Self::Error>;

    /// Save the archived play history
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be saved.
    fn save(&self, entries: &[ArchiveEntry]) -> Result<(), Self::Error>;
}
