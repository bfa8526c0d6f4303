//! Rewriting raw text before it is tokenized.
//!
//! ```
//! use glaive::analysis::char_filter::CharFilter;
//! use glaive::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::punctuation();
//! assert_eq!(filter.apply("Cats, dogs & birds!"), "Cats dogs  birds");
//! ```

/// A whole-text rewrite applied ahead of the tokenizer.
pub trait CharFilter: Send + Sync {
    fn apply(&self, input: &str) -> String;

    fn name(&self) -> &'static str;
}

pub mod pattern_replace;
