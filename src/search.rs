//! Boolean AND search over barreled postings.
//!
//! A query is normalized exactly like document text. Each distinct query
//! term becomes an expansion group; postings are unioned within a group and
//! intersected across groups. Results are doc ids in ascending order.

pub mod processor;

pub use processor::{ExpansionGroup, QueryProcessor, expand_query, search_unbarreled};
