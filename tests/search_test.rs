//! Integration tests for query processing.

use std::sync::Arc;
use std::thread;

use glaive::config::IndexConfig;
use glaive::prelude::*;
use glaive::search::search_unbarreled;
use tempfile::TempDir;

fn docs(items: &[(&str, &str)]) -> Vec<Document> {
    items
        .iter()
        .map(|(id, text)| Document::from_text(*id, *text))
        .collect()
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine_with(morphology: Arc<dyn MorphologyProvider>, items: &[(&str, &str)]) -> Result<SearchEngine> {
    init_logger();
    let engine = SearchEngine::new(IndexConfig::default(), morphology)?;
    engine.rebuild(docs(items))?;
    Ok(engine)
}

fn identity() -> Arc<dyn MorphologyProvider> {
    Arc::new(IdentityMorphology::new())
}

#[test]
fn test_empty_query_returns_nothing() -> Result<()> {
    let engine = engine_with(identity(), &[("doc1", "cat"), ("doc2", "dog")])?;

    assert!(engine.search("", false)?.is_empty());
    assert!(engine.search("", true)?.is_empty());
    assert!(engine.search(" ,.;! ", false)?.is_empty());
    Ok(())
}

#[test]
fn test_exact_match_after_normalization() -> Result<()> {
    let engine = engine_with(identity(), &[("doc1", "Cats are cute"), ("doc2", "Dogs are loyal")])?;

    assert_eq!(engine.search("Cats!", false)?, vec!["doc1"]);
    assert!(engine.search("cat", false)?.is_empty());
    assert_eq!(engine.search("are", false)?, vec!["doc1", "doc2"]);
    Ok(())
}

#[test]
fn test_lemmatized_index_matches_singular() -> Result<()> {
    let mut config = IndexConfig::default();
    config.lemmatize_on_index = true;
    let engine = SearchEngine::new(config, Arc::new(SuffixLemmatizer::new()))?;
    engine.rebuild(docs(&[("doc1", "Cats are cute"), ("doc2", "Dogs are loyal")]))?;

    assert_eq!(engine.search("cat", false)?, vec!["doc1"]);
    assert_eq!(engine.search("dogs", false)?, vec!["doc2"]);
    Ok(())
}

#[test]
fn test_and_across_terms() -> Result<()> {
    let engine = engine_with(identity(), &[("doc1", "cat"), ("doc2", "dog"), ("doc3", "cat dog")])?;

    assert_eq!(engine.search("cat dog", false)?, vec!["doc3"]);
    assert_eq!(engine.search("cat", false)?, vec!["doc1", "doc3"]);
    assert!(engine.search("cat dog bird", false)?.is_empty());
    Ok(())
}

#[test]
fn test_results_are_sorted() -> Result<()> {
    let engine = engine_with(
        identity(),
        &[("zeta", "shared"), ("alpha", "shared"), ("mike", "shared"), ("10", "shared")],
    )?;

    assert_eq!(engine.search("shared", false)?, vec!["10", "alpha", "mike", "zeta"]);
    Ok(())
}

#[test]
fn test_expansion_equivalence() -> Result<()> {
    let items = [("doc1", "a cat naps"), ("doc2", "dogs bark"), ("doc3", "the cat and the dog")];
    let engine = engine_with(Arc::new(SuffixLemmatizer::new()), &items)?;

    assert_eq!(engine.search("cats", true)?, engine.search("cat", false)?);
    assert_eq!(engine.search("cats", true)?, vec!["doc1", "doc3"]);
    assert!(engine.search("cats", false)?.is_empty());
    Ok(())
}

#[test]
fn test_expansion_with_dictionary() -> Result<()> {
    let dictionary = DictionaryMorphology::from_json(
        r#"{
            "lemmas": {"mice": "mouse"},
            "synonyms": [["car", "automobile", "auto"]]
        }"#,
    )?
    .with_fallback(Arc::new(SuffixLemmatizer::new()));

    let engine = engine_with(
        Arc::new(dictionary),
        &[
            ("doc1", "a mouse in the house"),
            ("doc2", "automobile repair"),
            ("doc3", "auto repair shop"),
            ("doc4", "car wash"),
        ],
    )?;

    assert_eq!(engine.search("mice", true)?, vec!["doc1"]);
    assert_eq!(engine.search("car", true)?, vec!["doc2", "doc3", "doc4"]);
    assert_eq!(engine.search("car repair", true)?, vec!["doc2", "doc3"]);
    assert_eq!(engine.search("car repair", false)?, Vec::<String>::new());
    Ok(())
}

#[test]
fn test_unbarreled_search_agrees() -> Result<()> {
    let items = [("doc1", "cat"), ("doc2", "dog"), ("doc3", "cat dog"), ("doc4", "Ünïcode 7 cats")];
    let morphology: Arc<dyn MorphologyProvider> = Arc::new(SuffixLemmatizer::new());
    let engine = engine_with(Arc::clone(&morphology), &items)?;
    let snapshot = engine.snapshot();

    for query in ["cat", "cat dog", "cats", "ünïcode", "7", "missing"] {
        for expand in [false, true] {
            let unbarreled = search_unbarreled(
                &snapshot.inverted,
                engine.normalizer(),
                morphology.as_ref(),
                query,
                expand,
            )?;
            assert_eq!(unbarreled, engine.search(query, expand)?, "{query} expand={expand}");
        }
    }
    Ok(())
}

#[test]
fn test_missing_barrel_is_a_hard_error() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(temp_dir.path())?);

    let engine = SearchEngine::new(IndexConfig::default(), identity())?.with_storage(Arc::clone(&storage));
    engine.rebuild(docs(&[("doc1", "apple"), ("doc2", "zebra")]))?;

    let opened = SearchEngine::open(Arc::clone(&storage), IndexConfig::default(), identity())?;
    assert_eq!(opened.search("apple", false)?, vec!["doc1"]);

    // Lost after open: the barrel holding "zebra" is loaded lazily and fails.
    storage.delete_file("barrel_4.json")?;
    let err = opened.search("zebra", false).unwrap_err();
    assert!(err.is_index_unavailable());

    // Barrels already cached keep serving.
    assert_eq!(opened.search("apple", false)?, vec!["doc1"]);
    Ok(())
}

#[test]
fn test_queries_during_rebuild_see_whole_generations() -> Result<()> {
    let engine = Arc::new(engine_with(identity(), &[("old1", "alpha beta"), ("old2", "alpha")])?);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || -> Result<()> {
                for _ in 0..200 {
                    let result = engine.search("alpha", false)?;
                    let old = result == vec!["old1", "old2"];
                    let new = result == vec!["new1", "new2", "new3"];
                    assert!(old || new, "mixed result {result:?}");
                }
                Ok(())
            })
        })
        .collect();

    for _ in 0..10 {
        engine.rebuild(docs(&[("new1", "alpha"), ("new2", "alpha beta"), ("new3", "alpha")]))?;
        engine.rebuild(docs(&[("old1", "alpha beta"), ("old2", "alpha")]))?;
    }

    for reader in readers {
        reader.join().unwrap()?;
    }
    assert_eq!(engine.generation(), 21);
    Ok(())
}

#[test]
fn test_queries_on_opened_index_during_persisted_rebuilds() -> Result<()> {
    init_logger();
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let old_docs = [("old1", "apple zebra"), ("old2", "apple")];
    let new_docs = [("new1", "apple zebra"), ("new2", "apple zebra"), ("new3", "zebra")];

    SearchEngine::new(IndexConfig::default(), identity())?
        .with_storage(Arc::clone(&storage))
        .rebuild(docs(&old_docs))?;
    // Barrels 0 (a-c) and 4 (s-z) are read lazily from storage by the
    // first generation.
    let engine = Arc::new(SearchEngine::open(Arc::clone(&storage), IndexConfig::default(), identity())?);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || -> Result<()> {
                for _ in 0..200 {
                    let result = engine.search("apple zebra", false)?;
                    let old = result == vec!["old1"];
                    let new = result == vec!["new1", "new2"];
                    assert!(old || new, "mixed result {result:?}");
                }
                Ok(())
            })
        })
        .collect();

    for _ in 0..5 {
        engine.rebuild(docs(&new_docs))?;
        engine.rebuild(docs(&old_docs))?;
    }
    engine.rebuild(docs(&new_docs))?;

    for reader in readers {
        reader.join().unwrap()?;
    }
    assert_eq!(engine.generation(), 12);

    let reopened = SearchEngine::open(storage, IndexConfig::default(), identity())?;
    assert_eq!(reopened.search("apple zebra", false)?, vec!["new1", "new2"]);
    assert_eq!(reopened.snapshot(), engine.snapshot());
    Ok(())
}
