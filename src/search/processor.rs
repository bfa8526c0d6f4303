//! Query processing.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::analysis::{Normalizer, Term};
use crate::barrel::partition::PartitionTable;
use crate::barrel::partitioner::{Barrel, BarrelSource};
use crate::document::DocId;
use crate::error::Result;
use crate::index::inverted::InvertedIndex;
use crate::morphology::{MorphologyProvider, PartOfSpeech};

/// One distinct query term and the index terms that may stand in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionGroup {
    /// The normalized query term.
    pub term: Term,
    /// `{term}`, or `{term, lemma} ∪ synonyms` when expanding.
    pub members: BTreeSet<Term>,
}

impl ExpansionGroup {
    fn new(term: Term, morphology: &dyn MorphologyProvider, expand: bool) -> Self {
        let mut members = BTreeSet::new();
        if expand {
            members.insert(morphology.lemmatize(&term, PartOfSpeech::Noun));
            members.extend(morphology.synonyms(&term));
        }
        members.insert(term.clone());
        ExpansionGroup { term, members }
    }
}

/// Normalize `query` and build one expansion group per distinct term, in
/// first-occurrence order.
pub fn expand_query(
    normalizer: &Normalizer,
    morphology: &dyn MorphologyProvider,
    query: &str,
    expand: bool,
) -> Result<Vec<ExpansionGroup>> {
    let mut seen = BTreeSet::new();
    Ok(normalizer
        .normalize(query)?
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .map(|term| ExpansionGroup::new(term, morphology, expand))
        .collect())
}

/// Union postings within each group, intersect across groups.
///
/// `collect` adds the postings of one term to the group's union; a term the
/// index does not hold adds nothing. Groups are visited in order and the
/// walk stops at the first group that leaves the intersection empty, so
/// later groups are never looked up.
fn intersect_groups<F>(groups: &[ExpansionGroup], mut collect: F) -> Result<Vec<DocId>>
where
    F: FnMut(&str, &mut BTreeSet<DocId>) -> Result<()>,
{
    let mut result: Option<BTreeSet<DocId>> = None;

    for group in groups {
        let mut union = BTreeSet::new();
        for member in &group.members {
            collect(member, &mut union)?;
        }

        let next = match result {
            None => union,
            Some(mut current) => {
                current.retain(|doc_id| union.contains(doc_id));
                current
            }
        };
        if next.is_empty() {
            return Ok(Vec::new());
        }
        result = Some(next);
    }

    Ok(result.map(|docs| docs.into_iter().collect()).unwrap_or_default())
}

/// Answers queries against one published set of barrels.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use glaive::analysis::Normalizer;
/// use glaive::barrel::{BarrelSet, PartitionRangeConfig, PartitionTable};
/// use glaive::config::IndexConfig;
/// use glaive::document::Document;
/// use glaive::index::IndexBuilder;
/// use glaive::morphology::IdentityMorphology;
/// use glaive::search::QueryProcessor;
///
/// let snapshot = IndexBuilder::new(Normalizer::new(), &IndexConfig::default())
///     .unwrap()
///     .build(vec![
///         Document::from_text("doc1", "cat"),
///         Document::from_text("doc2", "dog"),
///         Document::from_text("doc3", "cat dog"),
///     ])
///     .unwrap();
///
/// let table = PartitionTable::new(PartitionRangeConfig::default_table()).unwrap();
/// let barrels = Arc::new(BarrelSet::from_index(&snapshot.inverted, &table));
/// let processor = QueryProcessor::new(
///     Normalizer::new(),
///     Arc::new(IdentityMorphology::new()),
///     table,
///     barrels,
/// );
///
/// assert_eq!(processor.search("cat dog", false).unwrap(), vec!["doc3"]);
/// ```
#[derive(Clone)]
pub struct QueryProcessor {
    normalizer: Normalizer,
    morphology: Arc<dyn MorphologyProvider>,
    table: PartitionTable,
    barrels: Arc<dyn BarrelSource>,
}

impl std::fmt::Debug for QueryProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryProcessor")
            .field("normalizer", &self.normalizer)
            .field("morphology", &self.morphology.name())
            .field("table", &self.table)
            .field("barrels", &self.barrels)
            .finish()
    }
}

impl QueryProcessor {
    pub fn new(
        normalizer: Normalizer,
        morphology: Arc<dyn MorphologyProvider>,
        table: PartitionTable,
        barrels: Arc<dyn BarrelSource>,
    ) -> Self {
        QueryProcessor {
            normalizer,
            morphology,
            table,
            barrels,
        }
    }

    pub fn table(&self) -> &PartitionTable {
        &self.table
    }

    pub fn barrels(&self) -> &Arc<dyn BarrelSource> {
        &self.barrels
    }

    /// The expansion groups `search` would evaluate for `query`.
    pub fn expand(&self, query: &str, expand: bool) -> Result<Vec<ExpansionGroup>> {
        expand_query(&self.normalizer, self.morphology.as_ref(), query, expand)
    }

    /// Documents containing every query term (or, with `expand`, one of
    /// its expansions), sorted ascending.
    ///
    /// An empty query matches nothing. Each needed barrel is fetched once
    /// per query; a barrel that cannot be fetched fails the whole query.
    pub fn search(&self, query: &str, expand: bool) -> Result<Vec<DocId>> {
        let groups = self.expand(query, expand)?;
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let mut loaded: AHashMap<usize, Arc<Barrel>> = AHashMap::new();
        let docs = intersect_groups(&groups, |term, union| {
            let index = self.table.barrel_for(term);
            let barrel = match loaded.get(&index) {
                Some(barrel) => Arc::clone(barrel),
                None => {
                    let barrel = self.barrels.barrel(index)?;
                    loaded.insert(index, Arc::clone(&barrel));
                    barrel
                }
            };
            if let Some(postings) = barrel.postings(term) {
                union.extend(postings.iter().cloned());
            }
            Ok(())
        })?;

        debug!(
            "Query '{}': {} groups, {} barrels read, {} matches",
            query,
            groups.len(),
            loaded.len(),
            docs.len()
        );
        Ok(docs)
    }
}

/// [`QueryProcessor::search`] directly over an in-memory inverted index.
pub fn search_unbarreled(
    inverted: &InvertedIndex,
    normalizer: &Normalizer,
    morphology: &dyn MorphologyProvider,
    query: &str,
    expand: bool,
) -> Result<Vec<DocId>> {
    let groups = expand_query(normalizer, morphology, query, expand)?;
    intersect_groups(&groups, |term, union| {
        if let Some(postings) = inverted.postings(term) {
            union.extend(postings.iter().cloned());
        }
        Ok(())
    })
}
