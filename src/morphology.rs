//! Pluggable lemmatization and synonym lookup.
//!
//! The index core never depends on a specific linguistic resource. Anything
//! that can map a word to its dictionary form and list its synonyms can be
//! plugged in through [`MorphologyProvider`]; [`IdentityMorphology`] is the
//! no-op default.
//!
//! # Available Providers
//!
//! - [`IdentityMorphology`] - Lemma is the word itself, no synonyms
//! - [`suffix::SuffixLemmatizer`] - Rule-based English plural stripping
//! - [`dictionary::DictionaryMorphology`] - Explicit lemma table and synonym groups
//!
//! # Examples
//!
//! ```
//! use glaive::morphology::{MorphologyProvider, PartOfSpeech};
//! use glaive::morphology::suffix::SuffixLemmatizer;
//!
//! let lemmatizer = SuffixLemmatizer::new();
//! assert_eq!(lemmatizer.lemmatize("cats", PartOfSpeech::Noun), "cat");
//! assert!(lemmatizer.synonyms("cats").is_empty());
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod dictionary;
pub mod suffix;

pub use dictionary::DictionaryMorphology;
pub use suffix::SuffixLemmatizer;

/// Part of speech hint passed to the lemmatizer.
///
/// Without a tagger every word is treated as a noun.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    #[default]
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        };
        write!(f, "{name}")
    }
}

/// Lemma and synonym capability consumed by analysis and query expansion.
///
/// Implementations must be deterministic: the same word always yields the
/// same lemma and the same synonym set, otherwise documents and queries
/// normalize differently.
pub trait MorphologyProvider: Send + Sync {
    /// Map a word to its dictionary form. Unknown words map to themselves.
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String;

    /// All synonyms of a word, excluding the word itself.
    fn synonyms(&self, word: &str) -> BTreeSet<String>;

    /// Get the name of this provider (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// The no-op provider: every word is its own lemma and has no synonyms.
#[derive(Clone, Debug, Default)]
pub struct IdentityMorphology;

impl IdentityMorphology {
    /// Create a new identity provider.
    pub fn new() -> Self {
        IdentityMorphology
    }
}

impl MorphologyProvider for IdentityMorphology {
    fn lemmatize(&self, word: &str, _pos: PartOfSpeech) -> String {
        word.to_string()
    }

    fn synonyms(&self, _word: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
