//! Key-value persistence for small JSON documents.
//!
//! The calculator only needs `get` and `set` by string key. Writes are
//! synchronous; callers treat a failed write as non-fatal.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` when there is none
    /// or it cannot be read.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Errors that can occur when writing to a store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Failed to encode value for key '{0}': {1}")]
    Encode(String, #[source] serde_json::Error),
}
