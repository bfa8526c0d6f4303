//! File-based storage implementation.

use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{GlaiveError, Result};
use crate::storage::{Storage, StorageError};

/// Suffix of in-progress writes; such files never show up in listings.
const TEMP_SUFFIX: &str = ".tmp";

/// A storage rooted at a directory.
///
/// Each write goes to a uniquely named temporary file that is synced and
/// then renamed over the target, so readers never see a partial file.
#[derive(Debug)]
pub struct FileStorage {
    /// The root directory for storage.
    directory: PathBuf,
    /// Sequence for temporary file names.
    temp_counter: AtomicU64,
}

impl FileStorage {
    /// Create a new file storage in the given directory.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        // Create directory if it doesn't exist
        if !directory.exists() {
            std::fs::create_dir_all(&directory)
                .map_err(|e| GlaiveError::storage(format!("Failed to create directory: {e}")))?;
        }

        if !directory.is_dir() {
            return Err(GlaiveError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(FileStorage {
            directory,
            temp_counter: AtomicU64::new(0),
        })
    }

    /// The root directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Get the full path for a file name.
    fn file_path(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    fn temp_name(&self, name: &str) -> String {
        let n = self.temp_counter.fetch_add(1, Ordering::Relaxed);
        format!("{name}.{}.{n}{TEMP_SUFFIX}", std::process::id())
    }
}

fn not_found_or_io(name: &str, e: std::io::Error) -> StorageError {
    if e.kind() == ErrorKind::NotFound {
        StorageError::FileNotFound(name.to_string())
    } else {
        StorageError::IoError(e.to_string())
    }
}

impl Storage for FileStorage {
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let data = std::fs::read(self.file_path(name)).map_err(|e| not_found_or_io(name, e))?;
        Ok(data)
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let temp_name = self.temp_name(name);
        let temp_path = self.file_path(&temp_name);

        let write = || -> std::io::Result<()> {
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(data)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        };

        if let Err(e) = write() {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StorageError::IoError(format!("Failed to write {name}: {e}")).into());
        }

        std::fs::rename(&temp_path, self.file_path(name)).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            StorageError::IoError(format!("Failed to publish {name}: {e}"))
        })?;

        Ok(())
    }

    fn file_exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.file_path(name);
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| StorageError::IoError(format!("Failed to delete file: {e}")))?;
        }

        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in
            std::fs::read_dir(&self.directory).map_err(|e| StorageError::IoError(e.to_string()))?
        {
            let entry = entry.map_err(|e| StorageError::IoError(e.to_string()))?;
            let path = entry.path();

            if path.is_file() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if !name.ends_with(TEMP_SUFFIX) {
                        files.push(name.to_string());
                    }
                }
            }
        }

        files.sort();
        Ok(files)
    }
}
