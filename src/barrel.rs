//! Barrels: disjoint shards of the inverted index keyed by the leading
//! character of each term.
//!
//! A [`PartitionTable`] assigns every possible term to exactly one barrel.
//! [`partition`] re-keys a finished [`InvertedIndex`](crate::index::InvertedIndex)
//! into one [`Barrel`] per table entry, and a [`BarrelSource`] hands barrels
//! to the query processor, either from memory ([`BarrelSet`]) or lazily from
//! storage ([`BarrelStore`]).

pub mod partition;
pub mod partitioner;
pub mod store;

pub use partition::{PartitionRangeConfig, PartitionTable};
pub use partitioner::{Barrel, BarrelSet, BarrelSource, partition};
pub use store::BarrelStore;
