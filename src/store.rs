//! Snapshot storage backends.
//!
//! The editor persists its scene as one string payload under one key.
//! Backends are synchronous: a save blocks until the payload is written, which
//! is why the editor only saves at commit boundaries and never per move.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

/// Error returned by a [`SnapshotStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached (e.g. storage disabled).
    #[error("snapshot storage unavailable: {0}")]
    Unavailable(String),
    /// The store refused the write (e.g. quota exceeded).
    #[error("snapshot write rejected: {0}")]
    Rejected(String),
    /// Filesystem failure in a file-backed store.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value storage for scene snapshots.
pub trait SnapshotStore {
    /// Read the payload stored under `key`, `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend refuses or fails the write.
    fn save(&mut self, key: &str, payload: &str) -> Result<(), StoreError>;
}

/// In-memory store for headless sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `payload` under `key`.
    #[must_use]
    pub fn with_entry(key: &str, payload: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_owned(), payload.to_owned());
        store
    }

    /// Current payload under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful saves.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), payload.to_owned());
        self.writes += 1;
        Ok(())
    }
}
