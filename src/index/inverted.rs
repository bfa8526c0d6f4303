//! Inverted index: term to the documents containing it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::analysis::Term;
use crate::document::DocId;

/// Sorted, deduplicated document ids of one term.
pub type Postings = BTreeSet<DocId>;

/// Mapping `term → postings`.
///
/// Postings carry no counts; those live in the lexicon. Serializes as a JSON
/// object of `term → [doc_id, ...]`, which is also the shape of a barrel
/// file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: BTreeMap<Term, Postings>,
}

impl InvertedIndex {
    /// Create an empty inverted index.
    pub fn new() -> Self {
        Self::default()
    }

    /// List `doc_id` under `term`. Adding the same pair twice is a no-op.
    pub fn add_posting(&mut self, term: &str, doc_id: &str) {
        match self.postings.get_mut(term) {
            Some(postings) => {
                postings.insert(doc_id.to_string());
            }
            None => {
                let mut postings = Postings::new();
                postings.insert(doc_id.to_string());
                self.postings.insert(term.to_string(), postings);
            }
        }
    }

    /// Postings of a term, `None` when the term is not indexed.
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.postings.get(term)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of `(term, doc_id)` pairs.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(BTreeSet::len).sum()
    }

    /// Iterate terms in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Postings)> {
        self.postings.iter().map(|(term, docs)| (term.as_str(), docs))
    }

    /// Terms in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// Union-deduplicate another index into this one.
    pub fn merge(&mut self, other: InvertedIndex) {
        for (term, docs) in other.postings {
            self.postings.entry(term).or_default().extend(docs);
        }
    }

    pub(crate) fn insert_postings(&mut self, term: Term, postings: Postings) {
        self.postings.insert(term, postings);
    }
}

impl FromIterator<(Term, Postings)> for InvertedIndex {
    fn from_iter<T: IntoIterator<Item = (Term, Postings)>>(iter: T) -> Self {
        let mut index = InvertedIndex::new();
        for (term, postings) in iter {
            index.postings.entry(term).or_default().extend(postings);
        }
        index
    }
}
