//! Tizim Scan persistence layer.
//!
//! The history store persists through the generic [`StorageBackend`]
//! key-value contract. Two implementations are provided: a SQLite-backed
//! [`Database`] (with versioned schema migrations) and an in-memory
//! [`MemoryStorage`] for tests.
//!
//! # Usage
//!
//! ```no_run
//! use tizim_scan::storage::{Database, StorageBackend};
//!
//! // Open a persistent database
//! let db = Database::open("tizim-scan.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! db.save("some-key", "{}").expect("save failed");
//! ```

use crate::types::errors::StorageError;

pub mod connection;
pub mod memory;
pub mod migrations;

pub use connection::Database;
pub use memory::MemoryStorage;

/// Generic key-value persistence collaborator.
///
/// The in-memory history state is authoritative for the session; `save`
/// failures are treated as non-fatal by callers (logged, never surfaced).
pub trait StorageBackend {
    /// Returns the stored value for `key`, or `None` if absent.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A shared reference to a backend is itself a backend, so one database
/// can serve several consumers.
impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}
