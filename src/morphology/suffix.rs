//! Rule-based English lemmatizer.

use std::collections::BTreeSet;

use super::{MorphologyProvider, PartOfSpeech};

/// A lemmatizer that strips regular English plural endings from nouns.
///
/// Rules are tried longest suffix first. Other parts of speech, short
/// words and words without a known ending are returned unchanged.
///
/// | ending | replacement | example |
/// |--------|-------------|---------|
/// | `ies`  | `y`         | puppies → puppy |
/// | `sses` | `ss`        | classes → class |
/// | `shes`, `ches`, `xes`, `zes` | drop `es` | boxes → box |
/// | `s` (not `ss`, `us`, `is`) | drop `s` | cats → cat |
#[derive(Debug, Clone)]
pub struct SuffixLemmatizer {
    /// (suffix, replacement), longest suffix first.
    rules: Vec<(String, String)>,
    /// Words shorter than this are never rewritten.
    min_length: usize,
}

impl Default for SuffixLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixLemmatizer {
    /// Create a lemmatizer with the English plural rules.
    pub fn new() -> Self {
        Self::with_rules(vec![
            ("sses".to_string(), "ss".to_string()),
            ("shes".to_string(), "sh".to_string()),
            ("ches".to_string(), "ch".to_string()),
            ("ies".to_string(), "y".to_string()),
            ("xes".to_string(), "x".to_string()),
            ("zes".to_string(), "z".to_string()),
            ("s".to_string(), String::new()),
        ])
    }

    /// Create a lemmatizer with custom `(suffix, replacement)` rules.
    pub fn with_rules(mut rules: Vec<(String, String)>) -> Self {
        rules.sort_by_key(|(suffix, _)| std::cmp::Reverse(suffix.len()));
        SuffixLemmatizer {
            rules,
            min_length: 4,
        }
    }

    fn strip_plural(&self, word: &str) -> Option<String> {
        if word.chars().count() < self.min_length {
            return None;
        }

        for (suffix, replacement) in &self.rules {
            if !word.ends_with(suffix.as_str()) {
                continue;
            }
            // "glass", "virus", "analysis" are not plurals.
            if suffix == "s" && (word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
            {
                return None;
            }
            let stem = &word[..word.len() - suffix.len()];
            return Some(format!("{stem}{replacement}"));
        }

        None
    }
}

impl MorphologyProvider for SuffixLemmatizer {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        match pos {
            PartOfSpeech::Noun => self
                .strip_plural(word)
                .unwrap_or_else(|| word.to_string()),
            _ => word.to_string(),
        }
    }

    fn synonyms(&self, _word: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn name(&self) -> &'static str {
        "suffix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_nouns() {
        let lemmatizer = SuffixLemmatizer::new();
        let noun = PartOfSpeech::Noun;

        assert_eq!(lemmatizer.lemmatize("cats", noun), "cat");
        assert_eq!(lemmatizer.lemmatize("dogs", noun), "dog");
        assert_eq!(lemmatizer.lemmatize("puppies", noun), "puppy");
        assert_eq!(lemmatizer.lemmatize("classes", noun), "class");
        assert_eq!(lemmatizer.lemmatize("boxes", noun), "box");
        assert_eq!(lemmatizer.lemmatize("churches", noun), "church");
        assert_eq!(lemmatizer.lemmatize("dishes", noun), "dish");
    }

    #[test]
    fn test_non_plurals_are_unchanged() {
        let lemmatizer = SuffixLemmatizer::new();
        let noun = PartOfSpeech::Noun;

        assert_eq!(lemmatizer.lemmatize("glass", noun), "glass");
        assert_eq!(lemmatizer.lemmatize("virus", noun), "virus");
        assert_eq!(lemmatizer.lemmatize("analysis", noun), "analysis");
        assert_eq!(lemmatizer.lemmatize("cat", noun), "cat");
        assert_eq!(lemmatizer.lemmatize("bus", noun), "bus");
    }

    #[test]
    fn test_other_parts_of_speech_are_unchanged() {
        let lemmatizer = SuffixLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("runs", PartOfSpeech::Verb), "runs");
        assert!(lemmatizer.synonyms("cats").is_empty());
    }

    #[test]
    fn test_custom_rules() {
        let lemmatizer =
            SuffixLemmatizer::with_rules(vec![("en".to_string(), String::new())]);
        assert_eq!(lemmatizer.lemmatize("oxen", PartOfSpeech::Noun), "ox");
        assert_eq!(lemmatizer.lemmatize("cats", PartOfSpeech::Noun), "cats");
    }
}
