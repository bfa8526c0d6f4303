//! Dictionary-backed lemma and synonym lookup.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::{MorphologyProvider, PartOfSpeech};
use crate::error::{GlaiveError, Result};

/// On-disk shape of a morphology dictionary.
///
/// ```json
/// {
///   "lemmas": { "mice": "mouse", "geese": "goose" },
///   "synonyms": [["cat", "kitty", "feline"], ["car", "automobile"]]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MorphologyDictionaryFile {
    #[serde(default)]
    pub lemmas: BTreeMap<String, String>,
    #[serde(default)]
    pub synonyms: Vec<Vec<String>>,
}

/// A provider backed by an explicit lemma table and synonym groups.
///
/// Every member of a synonym group is a synonym of every other member. A
/// word that appears in several groups gets the union of them. Words missing
/// from the lemma table are handed to the fallback provider, if any.
#[derive(Clone, Default)]
pub struct DictionaryMorphology {
    lemmas: AHashMap<String, String>,
    synonyms: AHashMap<String, BTreeSet<String>>,
    fallback: Option<Arc<dyn MorphologyProvider>>,
}

impl std::fmt::Debug for DictionaryMorphology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryMorphology")
            .field("lemmas", &self.lemmas.len())
            .field("synonyms", &self.synonyms.len())
            .field("fallback", &self.fallback.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl DictionaryMorphology {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from a lemma table and synonym groups.
    pub fn from_parts<I, G>(lemmas: I, synonym_groups: G) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
        G: IntoIterator<Item = Vec<String>>,
    {
        let mut dictionary = Self::new();
        for (word, lemma) in lemmas {
            dictionary.add_lemma(word, lemma);
        }
        for group in synonym_groups {
            dictionary.add_synonym_group(group);
        }
        dictionary
    }

    /// Load a dictionary from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GlaiveError::storage(format!(
                "Failed to read morphology dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse a dictionary from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: MorphologyDictionaryFile = serde_json::from_str(json).map_err(|e| {
            GlaiveError::analysis(format!("Failed to parse morphology dictionary: {e}"))
        })?;
        Ok(Self::from_parts(file.lemmas, file.synonyms))
    }

    /// Consult `fallback` for words missing from the lemma table.
    pub fn with_fallback(mut self, fallback: Arc<dyn MorphologyProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Add or replace the lemma of a word.
    pub fn add_lemma<S: Into<String>>(&mut self, word: S, lemma: S) {
        self.lemmas.insert(word.into(), lemma.into());
    }

    /// Register a group of mutually synonymous words.
    pub fn add_synonym_group(&mut self, group: Vec<String>) {
        for (i, term) in group.iter().enumerate() {
            let entry = self.synonyms.entry(term.clone()).or_default();
            for (j, other) in group.iter().enumerate() {
                if i != j && other != term {
                    entry.insert(other.clone());
                }
            }
        }
    }

    /// Number of words with an explicit lemma.
    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Number of words with at least one synonym entry.
    pub fn synonym_count(&self) -> usize {
        self.synonyms.len()
    }
}

impl MorphologyProvider for DictionaryMorphology {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        match self.lemmas.get(word) {
            Some(lemma) => lemma.clone(),
            None => match &self.fallback {
                Some(fallback) => fallback.lemmatize(word, pos),
                None => word.to_string(),
            },
        }
    }

    fn synonyms(&self, word: &str) -> BTreeSet<String> {
        let mut synonyms = self.synonyms.get(word).cloned().unwrap_or_default();
        if let Some(fallback) = &self.fallback {
            synonyms.extend(fallback.synonyms(word));
        }
        synonyms.remove(word);
        synonyms
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
