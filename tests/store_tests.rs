//! Store integration tests
//!
//! Exercise corpus loading and queries against on-disk databases, including
//! reopening a store in a fresh session.

use corpus_store::{Config, CorpusError, CorpusStore, LoadOutcome, Result, Tokenizer};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tempfile::tempdir;

/// Tokenizer serving fixed word lists and counting its calls
#[derive(Clone)]
struct ScriptedTokenizer {
    sources: Arc<HashMap<String, Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedTokenizer {
    fn new(sources: &[(&str, &[&str])]) -> Self {
        let sources = sources
            .iter()
            .map(|(name, words)| (name.to_string(), words.iter().map(|w| w.to_string()).collect()))
            .collect();
        Self {
            sources: Arc::new(sources),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Tokenizer for ScriptedTokenizer {
    fn parse_corpus(&self, source_name: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sources
            .get(source_name)
            .cloned()
            .ok_or_else(|| CorpusError::source_unreadable(source_name, "no such source"))
    }
}

fn sample_tokenizer() -> ScriptedTokenizer {
    ScriptedTokenizer::new(&[("a", &["x", "y", "x"]), ("b", &["x"]), ("c", &["hi", "there"])])
}

#[test]
fn test_idempotent_ingestion_across_sessions() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("corpus.db");

    let tokenizer = sample_tokenizer();
    {
        let store = CorpusStore::with_tokenizer(&db_path, Config::default(), tokenizer.clone())?;
        assert!(store.load_corpus("a")?.was_ingested());
        assert_eq!(store.current_words(), vec!["x", "y", "x"]);
    }

    // Fresh session: the corpus is read back, not tokenized again
    let store = CorpusStore::with_tokenizer(&db_path, Config::default(), tokenizer.clone())?;
    assert!(store.current_words().is_empty());

    let outcome = store.load_corpus("a")?;
    assert!(matches!(outcome, LoadOutcome::Reused { words: 3, .. }));
    assert_eq!(tokenizer.calls(), 1);

    let mut reloaded = store.current_words();
    reloaded.sort();
    assert_eq!(reloaded, vec!["x", "x", "y"]);

    assert_eq!(store.list_corpora()?.len(), 1);
    assert_eq!(store.stats()?.word_count, 3);

    Ok(())
}

#[test]
fn test_frequency_queries() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let store = CorpusStore::with_tokenizer(
        temp_dir.path().join("corpus.db"),
        Config::default(),
        sample_tokenizer(),
    )?;

    store.load_corpora(["a", "b"])?;

    let by_corpus = store.frequency_by_corpus()?;
    assert_eq!(by_corpus.get("a"), Some(&3));
    assert_eq!(by_corpus.get("b"), Some(&1));

    assert_eq!(store.top_k_map(1)?, BTreeMap::from([("x".to_string(), 3)]));

    let top = store.top_k_words(5)?;
    assert_eq!(top.len(), 2);
    assert_eq!(top[1].word, "y");

    Ok(())
}

#[test]
fn test_failed_source_leaves_store_unchanged() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let store = CorpusStore::with_tokenizer(
        temp_dir.path().join("corpus.db"),
        Config::default(),
        sample_tokenizer(),
    )?;
    store.load_corpus("a")?;

    let err = store.load_corpus("nope").unwrap_err();
    assert!(matches!(err, CorpusError::SourceUnreadable { .. }));

    assert!(!store.corpus_exists("nope")?);
    let stats = store.stats()?;
    assert_eq!(stats.corpus_count, 1);
    assert_eq!(stats.word_count, 3);

    Ok(())
}

#[test]
fn test_delete_then_reload_reingests() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let tokenizer = sample_tokenizer();
    let store = CorpusStore::with_tokenizer(
        temp_dir.path().join("corpus.db"),
        Config::default(),
        tokenizer.clone(),
    )?;

    let first = store.load_corpus("c")?;
    assert!(store.delete_corpus("c")?);
    assert_eq!(store.stats()?.word_count, 0);

    let second = store.load_corpus("c")?;
    assert!(second.was_ingested());
    assert!(second.corpus_id() > first.corpus_id());
    assert_eq!(tokenizer.calls(), 2);

    Ok(())
}

#[test]
fn test_concurrent_loads_ingest_once() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let tokenizer = sample_tokenizer();
    let store = Arc::new(CorpusStore::with_tokenizer(
        temp_dir.path().join("corpus.db"),
        Config::default(),
        tokenizer.clone(),
    )?);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.load_corpus("a"))
        })
        .collect();

    let mut ingested = 0;
    for handle in handles {
        let outcome = handle.join().expect("loader thread panicked")?;
        if outcome.was_ingested() {
            ingested += 1;
        }
    }

    assert_eq!(ingested, 1);
    assert_eq!(tokenizer.calls(), 1);
    assert_eq!(store.stats()?.word_count, 3);
    assert_eq!(store.cached_len(), 8 * 3);

    Ok(())
}

#[test]
fn test_default_tokenizer_reads_files() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let source = temp_dir.path().join("greeting.txt");
    std::fs::write(&source, "Hello there!\nHello, again.")?;
    let source = source.to_str().ok_or("non-utf8 temp path")?;

    let store = CorpusStore::open(temp_dir.path().join("corpus.db"))?;
    store.load_corpus(source)?;

    assert_eq!(store.current_words(), vec!["hello", "there", "hello", "again"]);
    assert_eq!(store.top_k_map(1)?, BTreeMap::from([("hello".to_string(), 2)]));

    let missing = temp_dir.path().join("missing.txt");
    let err = store.load_corpus(missing.to_str().ok_or("non-utf8 temp path")?).unwrap_err();
    assert!(matches!(err, CorpusError::SourceUnreadable { .. }));

    Ok(())
}
