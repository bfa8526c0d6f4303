//! Forward index: document to the distinct terms it contains.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::analysis::Term;
use crate::document::DocId;

/// Mapping `doc_id → sorted distinct terms`.
///
/// Serializes as a JSON object of `doc_id → [term, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForwardIndex {
    documents: BTreeMap<DocId, BTreeSet<Term>>,
}

impl ForwardIndex {
    /// Create an empty forward index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the terms of a document.
    ///
    /// A document id that is already present keeps the union of both term
    /// sets.
    pub fn insert<I>(&mut self, doc_id: &str, terms: I)
    where
        I: IntoIterator<Item = Term>,
    {
        self.documents
            .entry(doc_id.to_string())
            .or_default()
            .extend(terms);
    }

    /// Distinct terms of a document in ascending order.
    pub fn terms(&self, doc_id: &str) -> Option<&BTreeSet<Term>> {
        self.documents.get(doc_id)
    }

    /// Whether the document was indexed.
    pub fn contains(&self, doc_id: &str) -> bool {
        self.documents.contains_key(doc_id)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Term>)> {
        self.documents.iter().map(|(id, terms)| (id.as_str(), terms))
    }

    /// Union another forward index into this one.
    pub fn merge(&mut self, other: ForwardIndex) {
        for (doc_id, terms) in other.documents {
            self.documents.entry(doc_id).or_default().extend(terms);
        }
    }
}
