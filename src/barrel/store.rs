//! Barrels persisted through [`Storage`] and loaded on demand.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ahash::AHashMap;
use log::{debug, warn};
use parking_lot::RwLock;

use crate::barrel::partition::PartitionTable;
use crate::barrel::partitioner::{Barrel, BarrelSource};
use crate::config::FileNames;
use crate::error::{GlaiveError, Result};
use crate::index::snapshot::IndexSnapshot;
use crate::storage::Storage;

/// Barrel files of one index with a shared read-through cache.
///
/// A barrel is parsed and checked outside the lock and enters the cache only
/// once it is complete, so concurrent queries never observe a half-loaded
/// barrel. When two queries race to load the same barrel, the first insert
/// wins and both get the same `Arc`.
///
/// Every barrel read from storage must hold only terms of its own range.
/// With a reference snapshot attached it must also hold exactly the
/// reference's terms for that range, with identical postings; any other
/// content is reported as [`GlaiveError::IndexUnavailable`].
pub struct BarrelStore {
    storage: Arc<dyn Storage>,
    table: PartitionTable,
    file_names: FileNames,
    reference: Option<Arc<IndexSnapshot>>,
    cache: RwLock<AHashMap<usize, Arc<Barrel>>>,
    retired: AtomicBool,
}

impl std::fmt::Debug for BarrelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarrelStore")
            .field("storage", &self.storage)
            .field("barrels", &self.table.len())
            .field("cached", &self.cached_count())
            .field("checked", &self.reference.is_some())
            .field("retired", &self.is_retired())
            .finish()
    }
}

impl BarrelStore {
    pub fn new(storage: Arc<dyn Storage>, table: PartitionTable, file_names: FileNames) -> Self {
        BarrelStore {
            storage,
            table,
            file_names,
            reference: None,
            cache: RwLock::new(AHashMap::new()),
            retired: AtomicBool::new(false),
        }
    }

    /// Check every barrel read from storage against `snapshot`.
    pub fn with_reference(mut self, snapshot: Arc<IndexSnapshot>) -> Self {
        self.reference = Some(snapshot);
        self
    }

    pub fn table(&self) -> &PartitionTable {
        &self.table
    }

    /// File name of barrel `index`.
    pub fn file_name(&self, index: usize) -> String {
        self.file_names.barrel_file(index)
    }

    /// Write one file per barrel, empty barrels included, and drop any
    /// cached barrels.
    pub fn write(&self, barrels: &[Barrel]) -> Result<()> {
        if barrels.len() != self.table.len() {
            return Err(GlaiveError::invalid_argument(format!(
                "expected {} barrels, got {}",
                self.table.len(),
                barrels.len()
            )));
        }

        for (index, barrel) in barrels.iter().enumerate() {
            if barrel.index() != index {
                return Err(GlaiveError::invalid_argument(format!(
                    "barrel {} found at position {}",
                    barrel.index(),
                    index
                )));
            }
            let name = self.file_name(index);
            self.storage.write_file(&name, barrel.to_json()?.as_bytes())?;
            debug!("Wrote {} ({} terms)", name, barrel.len());
        }

        self.clear_cache();
        Ok(())
    }

    /// Barrel `index`, from the cache or from storage.
    pub fn load(&self, index: usize) -> Result<Arc<Barrel>> {
        if let Some(barrel) = self.cache.read().get(&index) {
            return Ok(Arc::clone(barrel));
        }

        let range = *self.table.range(index).ok_or_else(|| {
            GlaiveError::index_unavailable(format!(
                "barrel {} does not exist ({} barrels)",
                index,
                self.table.len()
            ))
        })?;

        if self.is_retired() {
            return Err(GlaiveError::index_unavailable(format!(
                "barrel {index} was not loaded before its files were replaced"
            )));
        }

        let name = self.file_name(index);
        if !self.storage.file_exists(&name) {
            return Err(GlaiveError::index_unavailable(format!(
                "barrel file {name} is missing"
            )));
        }
        let json = self.storage.read_to_string(&name).map_err(|e| {
            GlaiveError::index_unavailable(format!("barrel file {name} cannot be read: {e}"))
        })?;
        let barrel = Barrel::from_json(index, range, &json)?;
        self.check(&barrel)
            .map_err(|e| GlaiveError::index_unavailable(format!("barrel file {name}: {e}")))?;
        debug!("Loaded {} ({} terms)", name, barrel.len());

        let mut cache = self.cache.write();
        Ok(Arc::clone(cache.entry(index).or_insert(Arc::new(barrel))))
    }

    /// Range membership and, with a reference, exact agreement.
    fn check(&self, barrel: &Barrel) -> std::result::Result<(), String> {
        let index = barrel.index();
        for (term, postings) in barrel.inverted().iter() {
            let owner = self.table.barrel_for(term);
            if owner != index {
                return Err(format!("term '{term}' belongs to barrel {owner}"));
            }
            if let Some(reference) = &self.reference {
                if reference.inverted.postings(term) != Some(postings) {
                    return Err(format!("postings of '{term}' differ from the inverted index"));
                }
            }
        }

        if let Some(reference) = &self.reference {
            let expected = reference
                .inverted
                .terms()
                .filter(|term| self.table.barrel_for(term) == index)
                .count();
            if expected != barrel.len() {
                return Err(format!(
                    "holds {} terms, the inverted index has {} for its range",
                    barrel.len(),
                    expected
                ));
            }
        }
        Ok(())
    }

    /// Load every barrel, failing on the first one that is unavailable.
    pub fn load_all(&self) -> Result<Vec<Arc<Barrel>>> {
        (0..self.table.len()).map(|index| self.load(index)).collect()
    }

    /// Number of barrels currently cached.
    pub fn cached_count(&self) -> usize {
        self.cache.read().len()
    }

    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }
}

impl BarrelSource for BarrelStore {
    fn barrel(&self, index: usize) -> Result<Arc<Barrel>> {
        self.load(index)
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn preload(&self) -> Result<()> {
        let mut first_error = None;
        for index in 0..self.table.len() {
            if let Err(e) = self.load(index) {
                warn!("Barrel {index} could not be preloaded: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }
}
