//! In-memory storage implementation for testing and ephemeral indexes.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::storage::{Storage, StorageError};

/// An in-memory storage implementation.
///
/// Clones share the same files, so a clone handed to a reader observes
/// every write made through the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<RwLock<BTreeMap<String, Arc<[u8]>>>>,
}

impl MemoryStorage {
    /// Create an empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of files stored.
    pub fn file_count(&self) -> usize {
        self.files.read().len()
    }
}

impl Storage for MemoryStorage {
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let files = self.files.read();
        let data = files
            .get(name)
            .ok_or_else(|| StorageError::FileNotFound(name.to_string()))?;
        Ok(data.to_vec())
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        self.files.write().insert(name.to_string(), Arc::from(data));
        Ok(())
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.read().contains_key(name)
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        self.files.write().remove(name);
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.read().keys().cloned().collect())
    }
}
