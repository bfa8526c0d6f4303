//! Configuration for building, persisting and querying an index.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::barrel::partition::{PartitionRangeConfig, PartitionTable};
use crate::error::{GlaiveError, Result};
use crate::lexicon::TermIdStrategy;

/// Top-level index configuration.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use glaive::config::IndexConfig;
///
/// let config = IndexConfig::from_json(r#"{"term_ids": "content_hash"}"#).unwrap();
/// assert_eq!(config.partitions.len(), 7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Ordered names of the fields that make up a document's text.
    pub fields: Vec<String>,

    /// Barrel ranges, in barrel order.
    pub partitions: Vec<PartitionRangeConfig>,

    /// How lexicon term ids are assigned.
    pub term_ids: TermIdStrategy,

    /// Lemmatize every word (documents and queries alike) through the
    /// morphology provider.
    pub lemmatize_on_index: bool,

    /// Parallel build settings.
    pub parallelism: ParallelConfig,

    /// Names of the persisted artifacts.
    pub file_names: FileNames,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            fields: [
                "source_name",
                "author",
                "title",
                "description",
                "content",
                "category",
                "full_content",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            partitions: PartitionRangeConfig::default_table(),
            term_ids: TermIdStrategy::default(),
            lemmatize_on_index: false,
            parallelism: ParallelConfig::default(),
            file_names: FileNames::default(),
        }
    }
}

impl IndexConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GlaiveError::invalid_config(format!("Failed to parse config: {e}")))
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GlaiveError::invalid_config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Build the validated partition table.
    pub fn partition_table(&self) -> Result<PartitionTable> {
        PartitionTable::from_config(&self.partitions)
    }

    /// Check the whole configuration before any indexing or query work.
    pub fn validate(&self) -> Result<()> {
        self.partition_table()?;
        self.parallelism.validate()?;
        self.file_names.validate()?;
        Ok(())
    }
}

/// Settings for sharded parallel builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Build with a worker pool instead of a single pass.
    pub enabled: bool,

    /// Worker count. If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Documents per shard. If None, documents are split evenly across workers.
    pub shard_size: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            thread_pool_size: None,
            shard_size: None,
        }
    }
}

impl ParallelConfig {
    /// Effective worker count.
    pub fn threads(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Effective shard size for a corpus of `documents`.
    pub fn shard_size_for(&self, documents: usize) -> usize {
        match self.shard_size {
            Some(size) => size.max(1),
            None => documents.div_ceil(self.threads()).max(1),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.thread_pool_size == Some(0) {
            return Err(GlaiveError::invalid_config("thread_pool_size cannot be zero"));
        }
        if self.shard_size == Some(0) {
            return Err(GlaiveError::invalid_config("shard_size cannot be zero"));
        }
        Ok(())
    }
}

/// Names of the persisted index artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    pub forward_index: String,
    pub inverted_index: String,
    pub lexicon: String,
    /// Barrel file name template; `{index}` is replaced by the barrel number.
    pub barrel: String,
    /// Checksums of every other artifact, written last.
    pub manifest: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            forward_index: "forward_index.json".to_string(),
            inverted_index: "inverted_index.json".to_string(),
            lexicon: "lexicon.json".to_string(),
            barrel: "barrel_{index}.json".to_string(),
            manifest: "manifest.json".to_string(),
        }
    }
}

impl FileNames {
    /// File name of barrel `index`.
    pub fn barrel_file(&self, index: usize) -> String {
        self.barrel.replace("{index}", &index.to_string())
    }

    /// Forward index, inverted index and lexicon, in that order.
    pub fn snapshot_files(&self) -> [&String; 3] {
        [&self.forward_index, &self.inverted_index, &self.lexicon]
    }

    fn validate(&self) -> Result<()> {
        if !self.barrel.contains("{index}") {
            return Err(GlaiveError::invalid_config(format!(
                "barrel file name '{}' must contain '{{index}}'",
                self.barrel
            )));
        }
        let names = self.snapshot_files();
        if names.into_iter().chain([&self.manifest]).any(|n| n.is_empty()) {
            return Err(GlaiveError::invalid_config("artifact file names cannot be empty"));
        }
        let mut seen = std::collections::BTreeSet::new();
        for name in names.into_iter().chain([&self.manifest]) {
            if !seen.insert(name.as_str()) {
                return Err(GlaiveError::invalid_config(format!(
                    "artifact file name '{name}' is used twice"
                )));
            }
        }
        Ok(())
    }
}
