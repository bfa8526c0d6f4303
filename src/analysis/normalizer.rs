//! Text to term normalization shared by indexing and querying.
//!
//! Documents and queries must go through the same [`Normalizer`], otherwise
//! a query term can never match the term produced for the same word in a
//! document.

use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;
use crate::morphology::MorphologyProvider;

/// A normalized term.
pub type Term = String;

/// Turns raw text into a sequence of normalized terms.
///
/// Steps: strip every character that is neither alphanumeric nor
/// whitespace, split on whitespace, lowercase, and (when a morphology
/// provider is attached) replace each word with its noun lemma.
///
/// # Examples
///
/// ```
/// use glaive::analysis::normalizer::Normalizer;
///
/// let normalizer = Normalizer::new();
/// let terms = normalizer.normalize("Cats are cute, cats!").unwrap();
/// assert_eq!(terms, vec!["cats", "are", "cute", "cats"]);
/// ```
#[derive(Clone, Debug)]
pub struct Normalizer {
    analyzer: Arc<PipelineAnalyzer>,
    lemmatizes: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer without lemmatization.
    pub fn new() -> Self {
        Normalizer {
            analyzer: Arc::new(Self::base_pipeline().with_name("normalizer")),
            lemmatizes: false,
        }
    }

    /// Create a normalizer that lemmatizes every word through `provider`.
    pub fn with_morphology(provider: Arc<dyn MorphologyProvider>) -> Self {
        let analyzer = Self::base_pipeline()
            .add_filter(Arc::new(LemmaFilter::new(provider)))
            .with_name("normalizer_lemma");

        Normalizer {
            analyzer: Arc::new(analyzer),
            lemmatizes: true,
        }
    }

    fn base_pipeline() -> PipelineAnalyzer {
        PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::punctuation()))
            .add_filter(Arc::new(LowercaseFilter::new()))
    }

    /// Whether terms are lemmatized.
    pub fn lemmatizes(&self) -> bool {
        self.lemmatizes
    }

    /// The underlying analysis pipeline.
    pub fn analyzer(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }

    /// Normalize text into terms, keeping order and multiplicity.
    pub fn normalize(&self, text: &str) -> Result<Vec<Term>> {
        Ok(self
            .analyzer
            .analyze(text)?
            .filter(|token| !token.is_empty())
            .map(|token| token.text)
            .collect())
    }

    /// Occurrence count of each distinct term, in first-occurrence order.
    pub fn term_counts(&self, text: &str) -> Result<Vec<(Term, u64)>> {
        Ok(count_terms(self.normalize(text)?))
    }
}

/// Collapse a term sequence into `(term, count)` pairs in first-occurrence
/// order.
pub fn count_terms(terms: Vec<Term>) -> Vec<(Term, u64)> {
    let mut slots: AHashMap<Term, usize> = AHashMap::with_capacity(terms.len());
    let mut counts: Vec<(Term, u64)> = Vec::new();

    for term in terms {
        match slots.get(&term) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(term.clone(), counts.len());
                counts.push((term, 1));
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::suffix::SuffixLemmatizer;

    #[test]
    fn test_normalize() {
        let normalizer = Normalizer::new();
        let terms = normalizer
            .normalize("The Quick-Brown fox's tail; the END.")
            .unwrap();

        assert_eq!(terms, vec!["the", "quickbrown", "foxs", "tail", "the", "end"]);
        assert!(!normalizer.lemmatizes());
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        let normalizer = Normalizer::new();
        assert!(normalizer.normalize("").unwrap().is_empty());
        assert!(normalizer.normalize("  ?!... --- ").unwrap().is_empty());
    }

    #[test]
    fn test_normalize_with_lemmatizer() {
        let normalizer = Normalizer::with_morphology(Arc::new(SuffixLemmatizer::new()));
        let terms = normalizer.normalize("Cats chase BOXES").unwrap();

        assert_eq!(terms, vec!["cat", "chase", "box"]);
        assert!(normalizer.lemmatizes());
    }

    #[test]
    fn test_term_counts_keep_first_occurrence_order() {
        let normalizer = Normalizer::new();
        let counts = normalizer.term_counts("dog cat Dog bird cat dog").unwrap();

        assert_eq!(
            counts,
            vec![
                ("dog".to_string(), 3),
                ("cat".to_string(), 2),
                ("bird".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_documents_and_queries_normalize_alike() {
        let normalizer = Normalizer::new();
        assert_eq!(
            normalizer.normalize("Cats!").unwrap(),
            normalizer.normalize("cats").unwrap()
        );
    }
}
