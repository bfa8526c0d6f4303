//! Storage abstraction for persisted index artifacts.
//!
//! Index files are small named blobs (JSON documents). The [`Storage`] trait
//! hides where they live so the persistence layer and the barrel store work
//! the same against a directory or an in-memory map.
//!
//! # Examples
//!
//! ```
//! use glaive::storage::{MemoryStorage, Storage};
//!
//! let storage = MemoryStorage::new();
//! storage.write_file("lexicon.json", b"{}").unwrap();
//! assert!(storage.file_exists("lexicon.json"));
//! assert_eq!(storage.read_file("lexicon.json").unwrap(), b"{}");
//! ```

use std::fmt;

use crate::error::GlaiveError;
use crate::error::Result;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A flat namespace of named files.
///
/// Writes replace the whole file. Implementations must make a write visible
/// all at once: a concurrent reader sees either the previous content or the
/// new one.
pub trait Storage: Send + Sync + fmt::Debug {
    /// Read the full content of a file.
    fn read_file(&self, name: &str) -> Result<Vec<u8>>;

    /// Create or replace a file.
    fn write_file(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Check if a file exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;

    /// List all files, sorted by name.
    fn list_files(&self) -> Result<Vec<String>>;

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, name: &str) -> Result<String> {
        let bytes = self.read_file(name)?;
        String::from_utf8(bytes)
            .map_err(|e| GlaiveError::storage(format!("File {name} is not valid UTF-8: {e}")))
    }
}

/// Error types specific to storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// File not found.
    FileNotFound(String),

    /// I/O error.
    IoError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::FileNotFound(name) => write!(f, "File not found: {name}"),
            StorageError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for GlaiveError {
    fn from(err: StorageError) -> Self {
        GlaiveError::storage(err.to_string())
    }
}
