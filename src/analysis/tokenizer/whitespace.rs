//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;
use crate::util::simd;

/// A tokenizer that splits text on whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens = if text.is_ascii() && text.len() >= 32 {
            Self::split_ascii(text)
        } else {
            Self::split_unicode(text)
        };

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

impl WhitespaceTokenizer {
    /// Chunked scan for longer ASCII text.
    fn split_ascii(text: &str) -> Vec<Token> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut start = 0;

        loop {
            while start < bytes.len() && simd::ascii::is_whitespace(bytes[start]) {
                start += 1;
            }
            if start == bytes.len() {
                return tokens;
            }

            let end = simd::ascii::find_whitespace(&bytes[start..])
                .map_or(bytes.len(), |offset| start + offset);
            tokens.push(Token::new(&text[start..end]));
            start = end;
        }
    }

    /// Unicode-aware split for non-ASCII or short text.
    fn split_unicode(text: &str) -> Vec<Token> {
        text.split(char::is_whitespace)
            .filter(|word| !word.is_empty())
            .map(Token::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello  world\ttest").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
    }

    #[test]
    fn test_repeated_words_are_kept() {
        let tokenizer = WhitespaceTokenizer::new();
        let words: Vec<String> = tokenizer
            .tokenize("cat dog cat")
            .unwrap()
            .map(|token| token.text)
            .collect();

        assert_eq!(words, vec!["cat", "dog", "cat"]);
    }

    #[test]
    fn test_ascii_and_unicode_paths_agree() {
        let tokenizer = WhitespaceTokenizer::new();
        let text = "  the quick brown fox jumps over the lazy dog  ";
        let fast: Vec<Token> = tokenizer.tokenize(text).unwrap().collect();
        let slow = WhitespaceTokenizer::split_unicode(text);

        assert_eq!(fast, slow);
        assert_eq!(fast.len(), 9);
    }

    #[test]
    fn test_unicode_whitespace() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer
            .tokenize("café\u{3000}naïve")
            .unwrap()
            .collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "café");
        assert_eq!(tokens[1].text, "naïve");
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("   ").unwrap().count(), 0);
        assert_eq!(tokenizer.tokenize("").unwrap().count(), 0);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
    }
}
