//! Regex-based char filter.

use lazy_static::lazy_static;
use regex::Regex;

use super::CharFilter;
use crate::error::{GlaiveError, Result};

/// Characters that are neither alphanumeric nor whitespace.
///
/// `\p{Alphabetic}` plus `\p{N}` is exactly what `char::is_alphanumeric`
/// accepts, so the underscore is stripped as punctuation. A `[^\w\s]` rule
/// would keep it: `snake_case` becomes `snakecase` here but stays
/// `snake_case` there, so indexes built with that rule do not match queries
/// normalized by this one and have to be rebuilt.
pub const PUNCTUATION_PATTERN: &str = r"[^\p{Alphabetic}\p{N}\s]";

lazy_static! {
    static ref PUNCTUATION: Regex =
        Regex::new(PUNCTUATION_PATTERN).expect("punctuation pattern is a valid regex");
}

/// A char filter that replaces characters matching a regex pattern.
#[derive(Debug, Clone)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| GlaiveError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// A filter that deletes every character that is not alphanumeric or
    /// whitespace.
    pub fn punctuation() -> Self {
        Self {
            pattern: PUNCTUATION.clone(),
            replacement: String::new(),
        }
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "#").unwrap();
        assert_eq!(filter.apply("Year 2024, page 7"), "Year #, page #");
        assert_eq!(filter.pattern(), r"\d+");
    }

    #[test]
    fn test_punctuation_is_removed() {
        let filter = PatternReplaceCharFilter::punctuation();
        assert_eq!(
            filter.apply("don't stop-believing, o'neil_x!"),
            "dont stopbelieving oneilx"
        );
    }

    #[test]
    fn test_underscore_is_punctuation() {
        let filter = PatternReplaceCharFilter::punctuation();
        assert_eq!(filter.apply("snake_case __init__"), "snakecase init");
    }

    #[test]
    fn test_punctuation_keeps_unicode_letters_and_digits() {
        let filter = PatternReplaceCharFilter::punctuation();
        assert_eq!(filter.apply("Café №5 § 東京 ½\tok"), "Café 5  東京 ½\tok");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PatternReplaceCharFilter::new("(unclosed", "").unwrap_err();
        assert!(matches!(err, GlaiveError::Analysis(_)));
    }
}
