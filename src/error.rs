//! Error types for the Glaive library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`GlaiveError`] enum.
//!
//! # Examples
//!
//! ```
//! use glaive::error::{GlaiveError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(GlaiveError::index_unavailable("lexicon.json not found"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Glaive operations.
///
/// An unknown term is never represented here: terms absent from the index
/// simply have no postings.
#[derive(Error, Debug)]
pub enum GlaiveError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required index, barrel or lexicon artifact is missing or unparsable.
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    /// The partition table leaves some leading character unassigned or
    /// assigns one twice.
    #[error("Partition coverage error: {0}")]
    PartitionCoverage(String),

    /// Index-related errors (inconsistent statistics, invalid build input)
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with GlaiveError.
pub type Result<T> = std::result::Result<T, GlaiveError>;

impl GlaiveError {
    /// Create a new index unavailable error.
    pub fn index_unavailable<S: Into<String>>(msg: S) -> Self {
        GlaiveError::IndexUnavailable(msg.into())
    }

    /// Create a new partition coverage error.
    pub fn partition_coverage<S: Into<String>>(msg: S) -> Self {
        GlaiveError::PartitionCoverage(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Storage(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        GlaiveError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Other(msg.into())
    }

    /// Whether this error means a persisted artifact could not be loaded.
    pub fn is_index_unavailable(&self) -> bool {
        matches!(self, GlaiveError::IndexUnavailable(_))
    }
}
