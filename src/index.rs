//! Index construction.
//!
//! An indexing pass turns a complete document set into an [`IndexSnapshot`]:
//! the [`Lexicon`](crate::lexicon::Lexicon) of term statistics, the
//! [`ForwardIndex`] (document to distinct terms) and the [`InvertedIndex`]
//! (term to documents). The snapshot is immutable once built.

pub mod builder;
pub mod forward;
pub mod inverted;
pub mod snapshot;

pub use builder::IndexBuilder;
pub use forward::ForwardIndex;
pub use inverted::InvertedIndex;
pub use snapshot::{IndexSnapshot, IndexStats};
