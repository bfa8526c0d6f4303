//! The unit passed between tokenizer and filters.
//!
//! ```
//! use glaive::analysis::token::Token;
//!
//! let token = Token::new("Dogs").with_text("dog");
//! assert_eq!(token.text, "dog");
//! ```

use std::fmt;

/// One word of the char-filtered text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
}

impl Token {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token { text: text.into() }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Tokens flowing through an analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
