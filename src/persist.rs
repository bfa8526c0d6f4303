//! Saving and loading index artifacts.
//!
//! A persisted index is a set of JSON files in one [`Storage`]:
//!
//! | file | shape |
//! |------|-------|
//! | `forward_index.json` | `doc_id → [term, ...]` |
//! | `inverted_index.json` | `term → [doc_id, ...]` |
//! | `lexicon.json` | `term → {word_id, frequency, doc_freq, documents}` |
//! | `barrel_{i}.json` | `term → [doc_id, ...]` for barrel `i` |
//! | `manifest.json` | `{barrels, checksums: {file → crc32}}` |
//!
//! File names come from [`FileNames`]. [`IndexWriter::save_all`] removes
//! the manifest first, writes barrels, then the snapshot files, and the
//! manifest last. An index is readable only while its manifest matches
//! every other file byte for byte, so a write that stops halfway, or files
//! from two different builds, are reported as
//! [`GlaiveError::IndexUnavailable`] instead of being served.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::barrel::partition::PartitionTable;
use crate::barrel::partitioner::Barrel;
use crate::barrel::store::BarrelStore;
use crate::config::FileNames;
use crate::error::{GlaiveError, Result};
use crate::index::forward::ForwardIndex;
use crate::index::inverted::InvertedIndex;
use crate::index::snapshot::IndexSnapshot;
use crate::lexicon::{Lexicon, LexiconEntry, TermIdStrategy};
use crate::storage::Storage;

/// The commit record of a persisted index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexManifest {
    /// Number of barrel files.
    pub barrels: usize,
    /// CRC-32 of every other artifact, by file name.
    pub checksums: BTreeMap<String, u32>,
}

/// Writes snapshots and barrels.
#[derive(Debug, Clone)]
pub struct IndexWriter {
    storage: Arc<dyn Storage>,
    file_names: FileNames,
}

impl IndexWriter {
    pub fn new(storage: Arc<dyn Storage>, file_names: FileNames) -> Self {
        IndexWriter {
            storage,
            file_names,
        }
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let json = serde_json::to_vec(value)?;
        self.storage.write_file(name, &json)?;
        debug!("Wrote {} ({} bytes)", name, json.len());
        Ok(())
    }

    /// Persist a complete index: barrels, snapshot files, then the manifest.
    ///
    /// Until the manifest is written the stored index is unreadable; if any
    /// step fails it stays that way.
    pub fn save_all(
        &self,
        snapshot: &IndexSnapshot,
        table: &PartitionTable,
        barrels: &[Barrel],
    ) -> Result<IndexManifest> {
        self.storage.delete_file(&self.file_names.manifest)?;
        self.save_barrels(table, barrels)?;
        self.save(snapshot)?;
        self.commit(table)
    }

    /// Write the forward index, inverted index and lexicon.
    pub fn save(&self, snapshot: &IndexSnapshot) -> Result<()> {
        self.write_json(&self.file_names.forward_index, &snapshot.forward)?;
        self.write_json(&self.file_names.inverted_index, &snapshot.inverted)?;
        self.write_json(&self.file_names.lexicon, snapshot.lexicon.entries())?;

        let stats = snapshot.stats();
        info!(
            "Saved index: {} documents, {} terms",
            stats.documents, stats.terms
        );
        Ok(())
    }

    /// Write one file per barrel of `table`.
    pub fn save_barrels(&self, table: &PartitionTable, barrels: &[Barrel]) -> Result<()> {
        BarrelStore::new(
            Arc::clone(&self.storage),
            table.clone(),
            self.file_names.clone(),
        )
        .write(barrels)
    }

    /// Checksum the files currently stored for `table` and write the
    /// manifest.
    pub fn commit(&self, table: &PartitionTable) -> Result<IndexManifest> {
        let mut checksums = BTreeMap::new();
        let barrel_names = (0..table.len()).map(|i| self.file_names.barrel_file(i));
        for name in self
            .file_names
            .snapshot_files()
            .into_iter()
            .cloned()
            .chain(barrel_names)
        {
            let data = self.storage.read_file(&name)?;
            checksums.insert(name, crc32fast::hash(&data));
        }

        let manifest = IndexManifest {
            barrels: table.len(),
            checksums,
        };
        self.write_json(&self.file_names.manifest, &manifest)?;
        Ok(manifest)
    }
}

/// Reads snapshots back.
#[derive(Debug, Clone)]
pub struct IndexReader {
    storage: Arc<dyn Storage>,
    file_names: FileNames,
    strategy: TermIdStrategy,
}

impl IndexReader {
    /// `strategy` is the term id strategy the lexicon continues with.
    pub fn new(storage: Arc<dyn Storage>, file_names: FileNames, strategy: TermIdStrategy) -> Self {
        IndexReader {
            storage,
            file_names,
            strategy,
        }
    }

    /// Bytes of `name`, checked against the manifest.
    fn read_verified(&self, manifest: &IndexManifest, name: &str) -> Result<Vec<u8>> {
        let expected = manifest.checksums.get(name).ok_or_else(|| {
            GlaiveError::index_unavailable(format!("{name} is not part of the committed index"))
        })?;
        if !self.storage.file_exists(name) {
            return Err(GlaiveError::index_unavailable(format!("{name} is missing")));
        }
        let data = self
            .storage
            .read_file(name)
            .map_err(|e| GlaiveError::index_unavailable(format!("{name} cannot be read: {e}")))?;
        if crc32fast::hash(&data) != *expected {
            return Err(GlaiveError::index_unavailable(format!(
                "{name} does not match the committed index"
            )));
        }
        Ok(data)
    }

    fn parse<T: DeserializeOwned>(name: &str, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data)
            .map_err(|e| GlaiveError::index_unavailable(format!("{name} is malformed: {e}")))
    }

    fn read_json<T: DeserializeOwned>(&self, manifest: &IndexManifest, name: &str) -> Result<T> {
        Self::parse(name, &self.read_verified(manifest, name)?)
    }

    /// Whether a committed index is present.
    pub fn exists(&self) -> bool {
        self.storage.file_exists(&self.file_names.manifest)
            && self
                .file_names
                .snapshot_files()
                .iter()
                .all(|name| self.storage.file_exists(name))
    }

    /// The manifest of the committed index.
    pub fn load_manifest(&self) -> Result<IndexManifest> {
        let name = &self.file_names.manifest;
        if !self.storage.file_exists(name) {
            return Err(GlaiveError::index_unavailable(format!(
                "{name} is missing; no index was committed"
            )));
        }
        let data = self
            .storage
            .read_file(name)
            .map_err(|e| GlaiveError::index_unavailable(format!("{name} cannot be read: {e}")))?;
        Self::parse(name, &data)
    }

    /// Load only the lexicon.
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        let manifest = self.load_manifest()?;
        self.lexicon_with(&manifest)
    }

    fn lexicon_with(&self, manifest: &IndexManifest) -> Result<Lexicon> {
        let entries: BTreeMap<String, LexiconEntry> =
            self.read_json(manifest, &self.file_names.lexicon)?;
        Ok(Lexicon::from_entries(entries, self.strategy))
    }

    /// Load and cross-check the forward index, inverted index and lexicon.
    ///
    /// Files that are missing, malformed, not the ones the manifest
    /// committed, or inconsistent with each other are reported as
    /// [`GlaiveError::IndexUnavailable`].
    pub fn load(&self) -> Result<IndexSnapshot> {
        let manifest = self.load_manifest()?;
        let forward: ForwardIndex = self.read_json(&manifest, &self.file_names.forward_index)?;
        let inverted: InvertedIndex = self.read_json(&manifest, &self.file_names.inverted_index)?;
        let lexicon = self.lexicon_with(&manifest)?;

        let snapshot = IndexSnapshot::new(lexicon, forward, inverted);
        snapshot
            .validate()
            .map_err(|e| GlaiveError::index_unavailable(format!("persisted index is inconsistent: {e}")))?;

        let stats = snapshot.stats();
        info!(
            "Loaded index: {} documents, {} terms",
            stats.documents, stats.terms
        );
        Ok(snapshot)
    }

    /// Check that every barrel file of `table` is present and is the one
    /// the manifest committed.
    pub fn verify_barrels(&self, table: &PartitionTable) -> Result<()> {
        let manifest = self.load_manifest()?;
        if manifest.barrels != table.len() {
            return Err(GlaiveError::index_unavailable(format!(
                "index was committed with {} barrels, the partition table has {}",
                manifest.barrels,
                table.len()
            )));
        }
        for index in 0..table.len() {
            self.read_verified(&manifest, &self.file_names.barrel_file(index))?;
        }
        Ok(())
    }
}
