//! Sequential and sharded-parallel index builds.

use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::Normalizer;
use crate::config::{IndexConfig, ParallelConfig};
use crate::document::Document;
use crate::error::{GlaiveError, Result};
use crate::index::forward::ForwardIndex;
use crate::index::inverted::InvertedIndex;
use crate::index::snapshot::IndexSnapshot;
use crate::lexicon::{Lexicon, TermIdStrategy};

/// Drives the normalizer over a document set and produces an
/// [`IndexSnapshot`].
///
/// # Examples
///
/// ```
/// use glaive::analysis::Normalizer;
/// use glaive::config::IndexConfig;
/// use glaive::document::Document;
/// use glaive::index::IndexBuilder;
///
/// let builder = IndexBuilder::new(Normalizer::new(), &IndexConfig::default()).unwrap();
/// let snapshot = builder
///     .build(vec![
///         Document::from_text("doc1", "Cats are cute"),
///         Document::from_text("doc2", "Dogs are loyal"),
///     ])
///     .unwrap();
///
/// assert_eq!(snapshot.lexicon.lookup("are").unwrap().doc_freq, 2);
/// ```
pub struct IndexBuilder {
    normalizer: Normalizer,
    strategy: TermIdStrategy,
    parallelism: ParallelConfig,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("normalizer", &self.normalizer)
            .field("strategy", &self.strategy)
            .field("parallelism", &self.parallelism)
            .finish()
    }
}

impl IndexBuilder {
    /// Create a builder. A worker pool is started when parallel builds are
    /// enabled in `config`.
    pub fn new(normalizer: Normalizer, config: &IndexConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = if config.parallelism.enabled {
            Some(Arc::new(Self::create_pool(&config.parallelism)?))
        } else {
            None
        };

        Ok(IndexBuilder {
            normalizer,
            strategy: config.term_ids,
            parallelism: config.parallelism.clone(),
            thread_pool,
        })
    }

    fn create_pool(parallelism: &ParallelConfig) -> Result<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(parallelism.threads())
            .thread_name(|i| format!("glaive-index-{i}"))
            .build()
            .map_err(|e| GlaiveError::internal(format!("Failed to create thread pool: {e}")))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Build with the strategy chosen in the configuration.
    pub fn index(&self, documents: Vec<Document>) -> Result<IndexSnapshot> {
        if self.parallelism.enabled {
            self.build_parallel(documents)
        } else {
            self.build(documents)
        }
    }

    /// Build in a single pass, in document order.
    pub fn build<I>(&self, documents: I) -> Result<IndexSnapshot>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut partial = PartialIndex::new(self.strategy);
        for document in documents {
            partial.add_document(&self.normalizer, &document)?;
        }

        let snapshot = partial.finish();
        log_built(&snapshot);
        Ok(snapshot)
    }

    /// Build by splitting the documents into contiguous shards.
    ///
    /// Each worker indexes its shard into a private lexicon and private
    /// forward/inverted indexes. The partial results are merged in shard
    /// order, so the snapshot equals the one [`build`](Self::build) produces
    /// for the same document order, sequential term ids included.
    pub fn build_parallel(&self, documents: Vec<Document>) -> Result<IndexSnapshot> {
        let shard_size = self.parallelism.shard_size_for(documents.len());
        let shards: Vec<&[Document]> = documents.chunks(shard_size).collect();
        debug!(
            "Indexing {} documents in {} shards of up to {}",
            documents.len(),
            shards.len(),
            shard_size
        );

        let run = |shards: &[&[Document]]| -> Result<Vec<PartialIndex>> {
            shards
                .par_iter()
                .enumerate()
                .map(|(shard_id, shard)| self.build_shard(shard_id, shard))
                .collect()
        };

        let partials = match &self.thread_pool {
            Some(pool) => pool.install(|| run(&shards))?,
            None => Self::create_pool(&self.parallelism)?.install(|| run(&shards))?,
        };

        let mut merged = PartialIndex::new(self.strategy);
        for partial in partials {
            merged.merge(partial);
        }

        let snapshot = merged.finish();
        log_built(&snapshot);
        Ok(snapshot)
    }

    fn build_shard(&self, shard_id: usize, shard: &[Document]) -> Result<PartialIndex> {
        let mut partial = PartialIndex::new(self.strategy);
        for document in shard {
            partial.add_document(&self.normalizer, document)?;
        }
        debug!(
            "Shard {} indexed {} documents, {} terms",
            shard_id,
            shard.len(),
            partial.lexicon.len()
        );
        Ok(partial)
    }
}

fn log_built(snapshot: &IndexSnapshot) {
    let stats = snapshot.stats();
    info!(
        "Indexed {} documents: {} terms, {} postings, {} tokens",
        stats.documents, stats.terms, stats.postings, stats.tokens
    );
}

/// Index state owned by one worker.
#[derive(Debug)]
struct PartialIndex {
    lexicon: Lexicon,
    forward: ForwardIndex,
    inverted: InvertedIndex,
}

impl PartialIndex {
    fn new(strategy: TermIdStrategy) -> Self {
        PartialIndex {
            lexicon: Lexicon::new(strategy),
            forward: ForwardIndex::new(),
            inverted: InvertedIndex::new(),
        }
    }

    fn add_document(&mut self, normalizer: &Normalizer, document: &Document) -> Result<()> {
        let doc_id = document.doc_id.as_str();
        let counts = normalizer.term_counts(&document.content())?;

        for (term, count) in &counts {
            self.lexicon.register(term, doc_id, *count);
            self.inverted.add_posting(term, doc_id);
        }
        self.forward
            .insert(doc_id, counts.into_iter().map(|(term, _)| term));

        Ok(())
    }

    fn merge(&mut self, other: PartialIndex) {
        self.lexicon.merge(other.lexicon);
        self.forward.merge(other.forward);
        self.inverted.merge(other.inverted);
    }

    fn finish(self) -> IndexSnapshot {
        IndexSnapshot::new(self.lexicon, self.forward, self.inverted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[(&str, &str)]) -> Vec<Document> {
        items
            .iter()
            .map(|(id, text)| Document::from_text(*id, *text))
            .collect()
    }

    fn builder() -> IndexBuilder {
        IndexBuilder::new(Normalizer::new(), &IndexConfig::default()).unwrap()
    }

    #[test]
    fn test_build_small_corpus() {
        let snapshot = builder()
            .build(docs(&[("doc1", "Cats are cute"), ("doc2", "Dogs are loyal")]))
            .unwrap();

        let terms: Vec<&String> = snapshot.forward.terms("doc1").unwrap().iter().collect();
        assert_eq!(terms, vec!["are", "cats", "cute"]);
        assert_eq!(snapshot.inverted.postings("are").unwrap().len(), 2);
        assert_eq!(snapshot.lexicon.lookup("cats").unwrap().word_id, 0);
        assert_eq!(snapshot.lexicon.lookup("dogs").unwrap().word_id, 3);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_counts_within_document() {
        let snapshot = builder()
            .build(docs(&[("doc1", "the cat saw the other cat, the end")]))
            .unwrap();

        let the = snapshot.lexicon.lookup("the").unwrap();
        assert_eq!(the.frequency, 3);
        assert_eq!(the.doc_freq, 1);
        assert_eq!(snapshot.inverted.postings("the").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_fields_still_indexed() {
        let document = Document::new("doc1", vec![None, Some("Lone field".to_string()), None]);
        let snapshot = builder().build(vec![document]).unwrap();

        assert!(snapshot.forward.contains("doc1"));
        assert!(snapshot.inverted.contains_term("lone"));
    }

    #[test]
    fn test_empty_document_has_empty_forward_entry() {
        let snapshot = builder().build(docs(&[("doc1", "!!!")])).unwrap();

        assert!(snapshot.forward.terms("doc1").unwrap().is_empty());
        assert!(snapshot.inverted.is_empty());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_duplicate_doc_id_merges() {
        let snapshot = builder()
            .build(docs(&[("doc1", "cat"), ("doc1", "cat dog")]))
            .unwrap();

        assert_eq!(snapshot.forward.len(), 1);
        assert_eq!(snapshot.forward.terms("doc1").unwrap().len(), 2);
        let cat = snapshot.lexicon.lookup("cat").unwrap();
        assert_eq!(cat.frequency, 2);
        assert_eq!(cat.doc_freq, 1);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let corpus = docs(&[
            ("doc1", "Cats are cute"),
            ("doc2", "Dogs are loyal"),
            ("doc3", "cat dog bird"),
            ("doc4", "Birds sing; cats listen."),
            ("doc5", "Loyal dogs, cute cats"),
        ]);

        let mut config = IndexConfig::default();
        config.parallelism.enabled = true;
        config.parallelism.thread_pool_size = Some(2);
        config.parallelism.shard_size = Some(2);
        let parallel = IndexBuilder::new(Normalizer::new(), &config).unwrap();

        let expected = builder().build(corpus.clone()).unwrap();
        let actual = parallel.index(corpus).unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_build_parallel_without_configured_pool() {
        let corpus = docs(&[("doc1", "a b"), ("doc2", "b c"), ("doc3", "c d")]);
        let builder = builder();

        let sequential = builder.build(corpus.clone()).unwrap();
        let parallel = builder.build_parallel(corpus).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_build_parallel_empty_corpus() {
        let snapshot = builder().build_parallel(Vec::new()).unwrap();
        assert_eq!(snapshot, IndexSnapshot::default());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let corpus = docs(&[("doc1", "cat"), ("doc2", "dog"), ("doc3", "cat dog")]);
        let builder = builder();

        assert_eq!(
            builder.build(corpus.clone()).unwrap(),
            builder.build(corpus).unwrap()
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = IndexConfig::default();
        config.partitions.clear();
        let err = IndexBuilder::new(Normalizer::new(), &config).unwrap_err();
        assert!(matches!(err, GlaiveError::PartitionCoverage(_)));
    }
}
