//! Lexicon: per-term statistics collected while indexing.
//!
//! Every term seen during a build gets a [`LexiconEntry`] holding its stable
//! identifier, total occurrence count, document frequency and the count per
//! document. The lexicon is an owned value produced by one indexing pass and
//! published read-only with the rest of the snapshot.
//!
//! # Invariants
//!
//! For every entry, `doc_freq == documents.len()` and
//! `frequency == documents.values().sum()`. [`Lexicon::validate`] checks both.
//!
//! # Examples
//!
//! ```
//! use glaive::lexicon::{Lexicon, TermIdStrategy};
//!
//! let mut lexicon = Lexicon::new(TermIdStrategy::Sequential);
//! lexicon.register("cat", "doc1", 2);
//! lexicon.register("cat", "doc2", 1);
//!
//! let entry = lexicon.lookup("cat").unwrap();
//! assert_eq!(entry.word_id, 0);
//! assert_eq!(entry.frequency, 3);
//! assert_eq!(entry.doc_freq, 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GlaiveError, Result};

/// How term identifiers are assigned on first registration.
///
/// Both strategies are stable across process runs. `Sequential` ids depend
/// on the order terms are first seen; `ContentHash` ids depend only on the
/// term text, so they are identical across builds regardless of document
/// order, at the cost of possible collisions between distinct terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermIdStrategy {
    /// Monotonic counter starting at 0.
    #[default]
    Sequential,
    /// CRC-32 of the term's UTF-8 bytes.
    ContentHash,
}

impl TermIdStrategy {
    /// The content-derived id of a term.
    pub fn hash_term(term: &str) -> u64 {
        u64::from(crc32fast::hash(term.as_bytes()))
    }
}

/// Statistics for a single term.
///
/// Serializes to the persisted lexicon shape
/// `{word_id, frequency, doc_freq, documents}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Stable term identifier.
    pub word_id: u64,
    /// Total occurrences across all documents.
    pub frequency: u64,
    /// Number of distinct documents containing the term.
    pub doc_freq: u64,
    /// Occurrences per document.
    pub documents: BTreeMap<String, u64>,
}

impl LexiconEntry {
    /// Create an empty entry.
    pub fn new(word_id: u64) -> Self {
        LexiconEntry {
            word_id,
            frequency: 0,
            doc_freq: 0,
            documents: BTreeMap::new(),
        }
    }

    /// Record `count` occurrences in `doc_id`.
    pub fn add_document(&mut self, doc_id: &str, count: u64) {
        match self.documents.get_mut(doc_id) {
            Some(existing) => *existing += count,
            None => {
                self.documents.insert(doc_id.to_string(), count);
                self.doc_freq += 1;
            }
        }
        self.frequency += count;
    }

    /// Occurrences of the term in one document, 0 if absent.
    pub fn count_in(&self, doc_id: &str) -> u64 {
        self.documents.get(doc_id).copied().unwrap_or(0)
    }

    fn check(&self, term: &str) -> Result<()> {
        if self.doc_freq != self.documents.len() as u64 {
            return Err(GlaiveError::index(format!(
                "term '{}': doc_freq {} but {} documents recorded",
                term,
                self.doc_freq,
                self.documents.len()
            )));
        }
        let sum: u64 = self.documents.values().sum();
        if self.frequency != sum {
            return Err(GlaiveError::index(format!(
                "term '{}': frequency {} but per-document counts sum to {}",
                term, self.frequency, sum
            )));
        }
        Ok(())
    }
}

/// Registry of term statistics for one indexing pass.
///
/// Not synchronized: parallel builds give each worker its own lexicon and
/// combine them with [`Lexicon::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: BTreeMap<String, LexiconEntry>,
    strategy: TermIdStrategy,
    next_id: u64,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new(strategy: TermIdStrategy) -> Self {
        Lexicon {
            entries: BTreeMap::new(),
            strategy,
            next_id: 0,
        }
    }

    /// The id strategy of this lexicon.
    pub fn strategy(&self) -> TermIdStrategy {
        self.strategy
    }

    fn allocate_id(&mut self, term: &str) -> u64 {
        match self.strategy {
            TermIdStrategy::Sequential => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            TermIdStrategy::ContentHash => TermIdStrategy::hash_term(term),
        }
    }

    /// Record `count` occurrences of `term` in `doc_id`.
    ///
    /// Allocates an id on first sight of the term. `frequency` grows by
    /// `count` on every call, whether or not the document is new for the term.
    pub fn register(&mut self, term: &str, doc_id: &str, count: u64) {
        if !self.entries.contains_key(term) {
            let id = self.allocate_id(term);
            self.entries.insert(term.to_string(), LexiconEntry::new(id));
        }
        if let Some(entry) = self.entries.get_mut(term) {
            entry.add_document(doc_id, count);
        }
    }

    /// Statistics of a term, `None` if it was never registered.
    pub fn lookup(&self, term: &str) -> Option<&LexiconEntry> {
        self.entries.get(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no term was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LexiconEntry)> {
        self.entries.iter().map(|(term, entry)| (term.as_str(), entry))
    }

    /// Total number of term occurrences across the corpus.
    pub fn total_tokens(&self) -> u64 {
        self.entries.values().map(|e| e.frequency).sum()
    }

    /// Fold another lexicon into this one.
    ///
    /// Per-document counts add up and `doc_freq` is recomputed from the
    /// merged document map. Terms new to `self` keep their id under
    /// `ContentHash` and get the next counter value under `Sequential`,
    /// allocated in the order `other` first saw them.
    pub fn merge(&mut self, other: Lexicon) {
        let mut incoming: Vec<(String, LexiconEntry)> = other.entries.into_iter().collect();
        incoming.sort_by_key(|(_, entry)| entry.word_id);

        for (term, entry) in incoming {
            if !self.entries.contains_key(&term) {
                let id = match self.strategy {
                    TermIdStrategy::ContentHash if other.strategy == self.strategy => {
                        entry.word_id
                    }
                    _ => self.allocate_id(&term),
                };
                self.entries.insert(term.clone(), LexiconEntry::new(id));
            }
            if let Some(target) = self.entries.get_mut(&term) {
                for (doc_id, count) in entry.documents {
                    target.add_document(&doc_id, count);
                }
            }
        }
    }

    /// Check the per-entry invariants.
    pub fn validate(&self) -> Result<()> {
        for (term, entry) in &self.entries {
            entry.check(term)?;
        }
        Ok(())
    }

    /// Serialize to the persisted JSON shape (`term → entry`).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Rebuild a lexicon from its persisted JSON shape.
    ///
    /// The sequential counter resumes after the largest stored id.
    pub fn from_json(json: &str, strategy: TermIdStrategy) -> Result<Self> {
        let entries: BTreeMap<String, LexiconEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries, strategy))
    }

    /// Rebuild a lexicon from term entries.
    pub fn from_entries(entries: BTreeMap<String, LexiconEntry>, strategy: TermIdStrategy) -> Self {
        let next_id = match strategy {
            TermIdStrategy::Sequential => entries
                .values()
                .map(|e| e.word_id + 1)
                .max()
                .unwrap_or(0),
            TermIdStrategy::ContentHash => 0,
        };
        Lexicon {
            entries,
            strategy,
            next_id,
        }
    }

    /// The entries keyed by term.
    pub fn entries(&self) -> &BTreeMap<String, LexiconEntry> {
        &self.entries
    }
}
