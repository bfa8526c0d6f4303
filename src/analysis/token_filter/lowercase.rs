//! Lowercasing.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::util::simd;

/// Lowercases every token; pure ASCII words skip Unicode case mapping.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            let lowered = simd::ascii::to_lowercase(&token.text);
            token.with_text(lowered)
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn lower(words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words
            .iter()
            .map(|w| Token::new(*w))
            .collect();
        LowercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn test_ascii_and_unicode() {
        assert_eq!(
            lower(&["Hello", "WORLD", "ÜBERMENSCH", "Ça", "2024"]),
            vec!["hello", "world", "übermensch", "ça", "2024"]
        );
    }

    #[test]
    fn test_long_ascii_word() {
        assert_eq!(
            lower(&["ANTIDISESTABLISHMENTARIANISM"]),
            vec!["antidisestablishmentarianism"]
        );
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}
