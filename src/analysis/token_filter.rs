//! Per-token rewrites applied after tokenizing.
//!
//! The normalizer runs [`lowercase::LowercaseFilter`] and, when lemmatizing,
//! [`lemma::LemmaFilter`] after it.
//!
//! ```
//! use glaive::analysis::token::Token;
//! use glaive::analysis::token_filter::Filter;
//! use glaive::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let tokens = vec![Token::new("Lazy"), Token::new("DOG")];
//! let words: Vec<String> = LowercaseFilter::new()
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//! assert_eq!(words, vec!["lazy", "dog"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Transforms a token stream. Filters are stateless and shared across threads.
pub trait Filter: Send + Sync {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    fn name(&self) -> &'static str;
}

pub mod lemma;
pub mod lowercase;
