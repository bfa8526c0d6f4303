//! Text analysis for Glaive.
//!
//! Tokenization and normalization turn raw document and query text into
//! terms. The building blocks (char filters, tokenizers, token filters,
//! analyzers) compose into the [`normalizer::Normalizer`] used by both the
//! index builder and the query processor.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use normalizer::{Normalizer, Term};
