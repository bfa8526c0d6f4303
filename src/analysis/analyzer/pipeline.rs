//! Char filters, then a tokenizer, then token filters.
//!
//! ```
//! use std::sync::Arc;
//!
//! use glaive::analysis::analyzer::Analyzer;
//! use glaive::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use glaive::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//! use glaive::analysis::token_filter::lowercase::LowercaseFilter;
//! use glaive::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_char_filter(Arc::new(PatternReplaceCharFilter::punctuation()))
//!     .add_filter(Arc::new(LowercaseFilter::new()));
//!
//! let words: Vec<String> = analyzer
//!     .analyze("The lazy-dog, again!")
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//! assert_eq!(words, vec!["the", "lazydog", "again"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// An analyzer assembled stage by stage.
///
/// Stages run in the order they were added within their kind; all char
/// filters run before the tokenizer, all token filters after it.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    label: String,
}

impl PipelineAnalyzer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            label: format!("pipeline_{}", tokenizer.name()),
            char_filters: Vec::new(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn add_char_filter(mut self, stage: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(stage);
        self
    }

    pub fn add_filter(mut self, stage: Arc<dyn Filter>) -> Self {
        self.filters.push(stage);
        self
    }

    /// Replace the generated label.
    pub fn with_name<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.char_filters.iter().map(|s| s.name()).collect();
        names.push(self.tokenizer.name());
        names.extend(self.filters.iter().map(|s| s.name()));
        names
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let prepared = self
            .char_filters
            .iter()
            .fold(text.to_string(), |acc, stage| stage.apply(&acc));

        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(&prepared)?, |tokens, stage| {
                stage.filter(tokens)
            })
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("label", &self.label)
            .field("stages", &self.stage_names())
            .finish()
    }
}
