//! Re-keying an inverted index into barrels.

use std::sync::Arc;

use log::debug;

use crate::barrel::partition::{PartitionRangeConfig, PartitionTable};
use crate::error::{GlaiveError, Result};
use crate::index::inverted::{InvertedIndex, Postings};

/// The terms of one partition range with their postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barrel {
    index: usize,
    range: PartitionRangeConfig,
    postings: InvertedIndex,
}

impl Barrel {
    pub fn new(index: usize, range: PartitionRangeConfig, postings: InvertedIndex) -> Self {
        Barrel {
            index,
            range,
            postings,
        }
    }

    /// Position of this barrel in the partition table.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn range(&self) -> PartitionRangeConfig {
        self.range
    }

    /// Postings of `term`, `None` when the barrel does not hold it.
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.postings.postings(term)
    }

    pub fn inverted(&self) -> &InvertedIndex {
        &self.postings
    }

    /// Number of terms in the barrel.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Serialize to the barrel file shape (`term → [doc_id, ...]`).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.postings)?)
    }

    /// Parse a barrel file.
    pub fn from_json(index: usize, range: PartitionRangeConfig, json: &str) -> Result<Self> {
        let postings: InvertedIndex = serde_json::from_str(json).map_err(|e| {
            GlaiveError::index_unavailable(format!("barrel {index} ({range}) is malformed: {e}"))
        })?;
        Ok(Barrel::new(index, range, postings))
    }
}

/// Split `inverted` into one barrel per entry of `table`, in table order.
///
/// Every term lands in exactly one barrel and postings are copied unchanged.
/// Ranges that receive no term still get an (empty) barrel.
pub fn partition(inverted: &InvertedIndex, table: &PartitionTable) -> Vec<Barrel> {
    let mut shards: Vec<InvertedIndex> = (0..table.len()).map(|_| InvertedIndex::new()).collect();

    for (term, postings) in inverted.iter() {
        let index = table.barrel_for(term);
        shards[index].insert_postings(term.to_string(), postings.clone());
    }

    let barrels: Vec<Barrel> = table
        .ranges()
        .iter()
        .zip(shards)
        .enumerate()
        .map(|(index, (range, postings))| Barrel::new(index, *range, postings))
        .collect();

    for barrel in &barrels {
        debug!(
            "Barrel {} ({}) holds {} terms",
            barrel.index(),
            barrel.range(),
            barrel.len()
        );
    }

    barrels
}

/// Something that can hand out barrels by number.
pub trait BarrelSource: Send + Sync + std::fmt::Debug {
    /// Barrel `index`. A barrel that should exist but cannot be produced is
    /// an error, never an empty barrel.
    fn barrel(&self, index: usize) -> Result<Arc<Barrel>>;

    /// Number of barrels.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every barrel resident so later lookups no longer touch the
    /// backing store. Barrels that fail are skipped; the first failure is
    /// returned once every barrel has been tried.
    fn preload(&self) -> Result<()> {
        Ok(())
    }

    /// The backing store is about to be overwritten: from now on only
    /// resident barrels may be served.
    fn retire(&self) {}
}

/// Barrels held in memory.
#[derive(Debug, Clone, Default)]
pub struct BarrelSet {
    barrels: Vec<Arc<Barrel>>,
}

impl BarrelSet {
    pub fn new(barrels: Vec<Barrel>) -> Self {
        BarrelSet {
            barrels: barrels.into_iter().map(Arc::new).collect(),
        }
    }

    /// Partition `inverted` and keep the barrels in memory.
    pub fn from_index(inverted: &InvertedIndex, table: &PartitionTable) -> Self {
        Self::new(partition(inverted, table))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Barrel> {
        self.barrels.iter().map(Arc::as_ref)
    }
}

impl BarrelSource for BarrelSet {
    fn barrel(&self, index: usize) -> Result<Arc<Barrel>> {
        self.barrels.get(index).cloned().ok_or_else(|| {
            GlaiveError::index_unavailable(format!(
                "barrel {} does not exist ({} barrels)",
                index,
                self.barrels.len()
            ))
        })
    }

    fn len(&self) -> usize {
        self.barrels.len()
    }
}
