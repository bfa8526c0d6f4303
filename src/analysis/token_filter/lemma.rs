//! Lemmatizing filter backed by a morphology provider.

use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;
use crate::morphology::{MorphologyProvider, PartOfSpeech};

/// Filter that replaces each token with its lemma.
///
/// No part-of-speech tagger is involved, so every token is lemmatized with
/// the same part of speech ([`PartOfSpeech::Noun`] unless overridden).
pub struct LemmaFilter {
    provider: Arc<dyn MorphologyProvider>,
    pos: PartOfSpeech,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("provider", &self.provider.name())
            .field("pos", &self.pos)
            .finish()
    }
}

impl LemmaFilter {
    /// Create a lemma filter that treats every token as a noun.
    pub fn new(provider: Arc<dyn MorphologyProvider>) -> Self {
        LemmaFilter {
            provider,
            pos: PartOfSpeech::Noun,
        }
    }

    /// Use a different part of speech for every token.
    pub fn with_pos(mut self, pos: PartOfSpeech) -> Self {
        self.pos = pos;
        self
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let provider = Arc::clone(&self.provider);
        let pos = self.pos;
        Ok(Box::new(tokens.map(move |token| {
            let lemma = provider.lemmatize(&token.text, pos);
            token.with_text(lemma)
        })))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
