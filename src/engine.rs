//! Building, publishing and querying an index.
//!
//! [`SearchEngine`] ties the pieces together. A rebuild produces a complete
//! snapshot and its barrels, optionally persists them, and then swaps a
//! single `Arc` so that queries see either the old generation or the new one
//! in full. A query clones the current `Arc` and runs without holding any
//! lock.

use std::sync::Arc;

use log::{info, warn};
use parking_lot::{Mutex, RwLock};

use crate::analysis::Normalizer;
use crate::barrel::partition::PartitionTable;
use crate::barrel::partitioner::{BarrelSet, BarrelSource, partition};
use crate::barrel::store::BarrelStore;
use crate::config::IndexConfig;
use crate::document::{DocId, Document};
use crate::error::Result;
use crate::index::builder::IndexBuilder;
use crate::index::snapshot::{IndexSnapshot, IndexStats};
use crate::morphology::MorphologyProvider;
use crate::persist::{IndexReader, IndexWriter};
use crate::search::processor::{ExpansionGroup, QueryProcessor};
use crate::storage::Storage;

/// One published index generation.
#[derive(Debug)]
struct Generation {
    number: u64,
    snapshot: Arc<IndexSnapshot>,
    processor: QueryProcessor,
}

/// A searchable index with atomic rebuilds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use glaive::config::IndexConfig;
/// use glaive::document::Document;
/// use glaive::engine::SearchEngine;
/// use glaive::morphology::SuffixLemmatizer;
///
/// let engine = SearchEngine::new(IndexConfig::default(), Arc::new(SuffixLemmatizer::new())).unwrap();
/// engine
///     .rebuild(vec![
///         Document::from_text("doc1", "Cats are cute"),
///         Document::from_text("doc2", "Dogs are loyal"),
///     ])
///     .unwrap();
///
/// assert_eq!(engine.search("are", false).unwrap(), vec!["doc1", "doc2"]);
/// assert_eq!(engine.search("cat", false).unwrap(), Vec::<String>::new());
/// assert_eq!(engine.search("dog", true).unwrap(), Vec::<String>::new());
/// assert_eq!(engine.search("cats", true).unwrap(), vec!["doc1"]);
/// ```
pub struct SearchEngine {
    config: IndexConfig,
    normalizer: Normalizer,
    morphology: Arc<dyn MorphologyProvider>,
    table: PartitionTable,
    builder: IndexBuilder,
    storage: Option<Arc<dyn Storage>>,
    current: RwLock<Arc<Generation>>,
    rebuild_lock: Mutex<()>,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("config", &self.config)
            .field("morphology", &self.morphology.name())
            .field("storage", &self.storage)
            .field("generation", &self.generation())
            .finish()
    }
}

impl SearchEngine {
    /// Create an engine with an empty in-memory index.
    pub fn new(config: IndexConfig, morphology: Arc<dyn MorphologyProvider>) -> Result<Self> {
        let table = config.partition_table()?;
        let normalizer = if config.lemmatize_on_index {
            Normalizer::with_morphology(Arc::clone(&morphology))
        } else {
            Normalizer::new()
        };
        let builder = IndexBuilder::new(normalizer.clone(), &config)?;

        let empty = Arc::new(IndexSnapshot::default());
        let barrels: Arc<dyn BarrelSource> =
            Arc::new(BarrelSet::from_index(&empty.inverted, &table));
        let processor =
            QueryProcessor::new(normalizer.clone(), Arc::clone(&morphology), table.clone(), barrels);

        Ok(SearchEngine {
            config,
            normalizer,
            morphology,
            table,
            builder,
            storage: None,
            current: RwLock::new(Arc::new(Generation {
                number: 0,
                snapshot: empty,
                processor,
            })),
            rebuild_lock: Mutex::new(()),
        })
    }

    /// Persist every rebuild to `storage`.
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Open a persisted index.
    ///
    /// The forward index, inverted index and lexicon are loaded and checked
    /// against the manifest up front, and every barrel file must be the one
    /// the manifest committed. Barrels themselves are parsed lazily on first
    /// use and checked against the loaded inverted index.
    pub fn open(
        storage: Arc<dyn Storage>,
        config: IndexConfig,
        morphology: Arc<dyn MorphologyProvider>,
    ) -> Result<Self> {
        let engine = Self::new(config, morphology)?.with_storage(Arc::clone(&storage));

        let reader = IndexReader::new(
            Arc::clone(&storage),
            engine.config.file_names.clone(),
            engine.config.term_ids,
        );
        let snapshot = Arc::new(reader.load()?);
        reader.verify_barrels(&engine.table)?;

        let store = BarrelStore::new(
            storage,
            engine.table.clone(),
            engine.config.file_names.clone(),
        )
        .with_reference(Arc::clone(&snapshot));

        engine.publish(snapshot, Arc::new(store));
        Ok(engine)
    }

    /// Index `documents` from scratch and publish the result.
    ///
    /// Returns the new generation number. Queries running during the
    /// rebuild keep using the previous generation. If persisting fails,
    /// nothing is published and the stored index stays unreadable until a
    /// later rebuild succeeds.
    pub fn rebuild(&self, documents: Vec<Document>) -> Result<u64> {
        let _guard = self.rebuild_lock.lock();

        let snapshot = self.builder.index(documents)?;
        let barrels = partition(&snapshot.inverted, &self.table);

        if let Some(storage) = &self.storage {
            self.retire_current();

            let writer = IndexWriter::new(Arc::clone(storage), self.config.file_names.clone());
            writer.save_all(&snapshot, &self.table, &barrels)?;
        }

        Ok(self.publish(Arc::new(snapshot), Arc::new(BarrelSet::new(barrels))))
    }

    /// Pull the published barrels into memory and stop them from reading
    /// files that are about to be overwritten.
    fn retire_current(&self) {
        let barrels = Arc::clone(self.current().processor.barrels());
        if let Err(e) = barrels.preload() {
            warn!("Previous generation could not be fully preloaded: {e}");
        }
        barrels.retire();
    }

    fn publish(&self, snapshot: Arc<IndexSnapshot>, barrels: Arc<dyn BarrelSource>) -> u64 {
        let processor = QueryProcessor::new(
            self.normalizer.clone(),
            Arc::clone(&self.morphology),
            self.table.clone(),
            barrels,
        );

        let mut current = self.current.write();
        let number = current.number + 1;
        let stats = snapshot.stats();
        *current = Arc::new(Generation {
            number,
            snapshot,
            processor,
        });
        info!(
            "Published generation {}: {} documents, {} terms",
            number, stats.documents, stats.terms
        );
        number
    }

    fn current(&self) -> Arc<Generation> {
        Arc::clone(&self.current.read())
    }

    /// Documents matching every query term, sorted ascending.
    pub fn search(&self, query: &str, expand: bool) -> Result<Vec<DocId>> {
        self.current().processor.search(query, expand)
    }

    /// The expansion groups a query would be evaluated with.
    pub fn explain(&self, query: &str, expand: bool) -> Result<Vec<ExpansionGroup>> {
        self.current().processor.expand(query, expand)
    }

    /// A query processor pinned to the published generation.
    ///
    /// It keeps answering from that generation after later rebuilds.
    pub fn processor(&self) -> QueryProcessor {
        self.current().processor.clone()
    }

    /// The published snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.current().snapshot)
    }

    /// Number of the published generation; 0 before the first publish.
    pub fn generation(&self) -> u64 {
        self.current.read().number
    }

    pub fn stats(&self) -> IndexStats {
        self.current().snapshot.stats()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}
