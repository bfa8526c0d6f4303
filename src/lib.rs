//! # Glaive
//!
//! A barreled term index with boolean AND search.
//!
//! Glaive turns a corpus of text documents into a lexicon of term
//! statistics, a forward index (document to terms) and an inverted index
//! (term to documents), shards the inverted index into barrels by the leading
//! character of each term, and answers AND queries with optional lemma and
//! synonym expansion.
//!
//! ## Features
//!
//! - Symmetric normalization of documents and queries
//! - Pluggable morphology (lemmatization and synonyms)
//! - Deterministic term ids, sequential or content-hashed
//! - Sharded parallel builds with a deterministic merge
//! - Validated partition tables with a mandatory catch-all barrel
//! - Lazy barrel loading with a shared read-through cache
//! - Atomic snapshot publication on rebuild
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glaive::prelude::*;
//!
//! let engine = SearchEngine::new(IndexConfig::default(), Arc::new(IdentityMorphology::new())).unwrap();
//! engine
//!     .rebuild(vec![
//!         Document::from_text("doc1", "cat"),
//!         Document::from_text("doc2", "dog"),
//!         Document::from_text("doc3", "cat dog"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(engine.search("cat dog", false).unwrap(), vec!["doc3"]);
//! assert!(engine.search("", false).unwrap().is_empty());
//! ```

pub mod analysis;
pub mod barrel;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod lexicon;
pub mod morphology;
pub mod persist;
pub mod search;
pub mod storage;
pub mod util;

pub mod prelude {
    pub use crate::analysis::Normalizer;
    pub use crate::barrel::{BarrelSet, BarrelSource, BarrelStore, PartitionTable, partition};
    pub use crate::config::IndexConfig;
    pub use crate::document::Document;
    pub use crate::engine::SearchEngine;
    pub use crate::error::{GlaiveError, Result};
    pub use crate::index::{IndexBuilder, IndexSnapshot};
    pub use crate::lexicon::{Lexicon, TermIdStrategy};
    pub use crate::morphology::{
        DictionaryMorphology, IdentityMorphology, MorphologyProvider, SuffixLemmatizer,
    };
    pub use crate::search::QueryProcessor;
    pub use crate::storage::{FileStorage, MemoryStorage, Storage};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
