//! Splitting filtered text into tokens.
//!
//! ```
//! use glaive::analysis::tokenizer::Tokenizer;
//! use glaive::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let words: Vec<String> = WhitespaceTokenizer::new()
//!     .tokenize("lazy  dog")
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//! assert_eq!(words, vec!["lazy", "dog"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Turns text into a token stream. Shared by indexing workers and queries.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    fn name(&self) -> &'static str;
}

pub mod whitespace;
