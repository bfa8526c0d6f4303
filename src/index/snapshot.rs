//! The immutable result of one indexing pass.

use serde::{Deserialize, Serialize};

use crate::error::{GlaiveError, Result};
use crate::index::forward::ForwardIndex;
use crate::index::inverted::InvertedIndex;
use crate::lexicon::Lexicon;

/// Lexicon, forward index and inverted index built together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSnapshot {
    pub lexicon: Lexicon,
    pub forward: ForwardIndex,
    pub inverted: InvertedIndex,
}

/// Size figures of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Indexed documents.
    pub documents: usize,
    /// Distinct terms.
    pub terms: usize,
    /// `(term, doc_id)` pairs in the inverted index.
    pub postings: usize,
    /// Term occurrences across the corpus.
    pub tokens: u64,
}

impl IndexSnapshot {
    pub fn new(lexicon: Lexicon, forward: ForwardIndex, inverted: InvertedIndex) -> Self {
        IndexSnapshot {
            lexicon,
            forward,
            inverted,
        }
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.forward.len(),
            terms: self.inverted.len(),
            postings: self.inverted.posting_count(),
            tokens: self.lexicon.total_tokens(),
        }
    }

    /// Check that the three structures describe the same corpus.
    ///
    /// * a term is in `forward[d]` exactly when `d` is in `inverted[term]`;
    /// * the lexicon and the inverted index have the same terms, and each
    ///   entry's documents are the term's postings;
    /// * every lexicon entry is internally consistent.
    pub fn validate(&self) -> Result<()> {
        self.lexicon.validate()?;

        for (doc_id, terms) in self.forward.iter() {
            for term in terms {
                let listed = self
                    .inverted
                    .postings(term)
                    .is_some_and(|docs| docs.contains(doc_id));
                if !listed {
                    return Err(GlaiveError::index(format!(
                        "forward index lists '{term}' in '{doc_id}' but the posting is missing"
                    )));
                }
            }
        }

        for (term, docs) in self.inverted.iter() {
            for doc_id in docs {
                let listed = self
                    .forward
                    .terms(doc_id)
                    .is_some_and(|terms| terms.contains(term));
                if !listed {
                    return Err(GlaiveError::index(format!(
                        "posting '{term}' -> '{doc_id}' has no forward entry"
                    )));
                }
            }

            let entry = self.lexicon.lookup(term).ok_or_else(|| {
                GlaiveError::index(format!("term '{term}' is missing from the lexicon"))
            })?;
            if !entry.documents.keys().eq(docs.iter()) {
                return Err(GlaiveError::index(format!(
                    "lexicon documents of '{term}' differ from its postings"
                )));
            }
        }

        if self.lexicon.len() != self.inverted.len() {
            return Err(GlaiveError::index(format!(
                "lexicon has {} terms but the inverted index has {}",
                self.lexicon.len(),
                self.inverted.len()
            )));
        }

        Ok(())
    }
}
