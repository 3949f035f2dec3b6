//! CorpusStore - Main ingestion API
//!
//! This provides the high-level interface for loading corpora into the store
//! and collecting their words into the word cache.

use crate::cache::WordCache;
use crate::config::Config;
use crate::error::{CorpusError, Result};
use crate::storage::{CorpusRecord, Database, StoreStats};
use crate::text::{Tokenizer, WordTokenizer};
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Which path [`CorpusStore::load_corpus`] took
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The corpus was new; it was tokenized and written to the store
    Ingested { corpus_id: i64, words: usize },

    /// The corpus was already stored; its words were read back
    Reused { corpus_id: i64, words: usize },
}

impl LoadOutcome {
    pub fn corpus_id(&self) -> i64 {
        match self {
            LoadOutcome::Ingested { corpus_id, .. } | LoadOutcome::Reused { corpus_id, .. } => {
                *corpus_id
            }
        }
    }

    /// Number of words the load appended to the cache
    pub fn words(&self) -> usize {
        match self {
            LoadOutcome::Ingested { words, .. } | LoadOutcome::Reused { words, .. } => *words,
        }
    }

    pub fn was_ingested(&self) -> bool {
        matches!(self, LoadOutcome::Ingested { .. })
    }
}

/// Corpus store: one database connection, one tokenizer and one word cache.
///
/// Every database access goes through a single lock, so an ingestion is never
/// observed half-written by a query or raced by a second ingestion of the same
/// name.
pub struct CorpusStore {
    pub(crate) config: Config,
    database: Mutex<Database>,
    tokenizer: Box<dyn Tokenizer>,
    cache: WordCache,
}

impl CorpusStore {
    /// Open (or create) the store at `path` with default settings
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(path, Config::default())
    }

    /// Open the store at `path`, tokenizing sources with [`WordTokenizer`]
    pub fn with_config<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let tokenizer = WordTokenizer::new(config.tokenizer.clone())?;
        Self::with_tokenizer(path, config, tokenizer)
    }

    /// Open the store at `path` with a caller-supplied tokenizer
    pub fn with_tokenizer<P, T>(path: P, config: Config, tokenizer: T) -> Result<Self>
    where
        P: AsRef<Path>,
        T: Tokenizer + 'static,
    {
        config.validate()?;
        let database = Database::with_config(path, &config.storage)?;
        Ok(Self::from_parts(config, database, Box::new(tokenizer)))
    }

    /// Create an in-memory store (for testing)
    pub fn memory<T: Tokenizer + 'static>(tokenizer: T) -> Result<Self> {
        let database = Database::memory()?;
        Ok(Self::from_parts(Config::default(), database, Box::new(tokenizer)))
    }

    fn from_parts(config: Config, database: Database, tokenizer: Box<dyn Tokenizer>) -> Self {
        Self {
            config,
            database: Mutex::new(database),
            tokenizer,
            cache: WordCache::new(),
        }
    }

    /// Lock the connection for the duration of one operation
    pub(crate) fn database(&self) -> Result<MutexGuard<'_, Database>> {
        self.database
            .lock()
            .map_err(|_| CorpusError::StorageUnavailable("database lock poisoned".to_string()))
    }

    /// Load the corpus called `name`.
    ///
    /// A name that is not stored yet is tokenized and written in a single
    /// transaction, and the tokens are appended to the word cache. A stored name
    /// is never tokenized again: its words are read back from the store and
    /// appended to the cache, so repeated loads append repeated copies.
    pub fn load_corpus(&self, name: &str) -> Result<LoadOutcome> {
        let mut db = self.database()?;

        if let Some(corpus_id) = db.find_corpus_id(name)? {
            let words = db.words_for_corpus(name)?;
            drop(db);

            let count = words.len();
            self.cache.extend(words);
            log::info!("Reused stored corpus {} ({} words)", name, count);
            return Ok(LoadOutcome::Reused {
                corpus_id,
                words: count,
            });
        }

        log::info!("Reading data from {}...", name);
        let words = self.tokenizer.parse_corpus(name)?;
        let corpus_id = db.insert_corpus(name, &words)?;
        drop(db);

        let count = words.len();
        self.cache.extend(words);
        log::info!("Done reading {} ({} words)", name, count);
        Ok(LoadOutcome::Ingested {
            corpus_id,
            words: count,
        })
    }

    /// Load each corpus in order, stopping at the first failure
    pub fn load_corpora<I, S>(&self, names: I) -> Result<Vec<LoadOutcome>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.load_corpus(name.as_ref()))
            .collect()
    }

    /// Append every stored word to the cache, returning how many were added
    pub fn load_all(&self) -> Result<usize> {
        let words = self.database()?.all_words()?;
        let count = words.len();
        self.cache.extend(words);
        log::info!("Loaded {} stored words into the cache", count);
        Ok(count)
    }

    /// Snapshot of the word cache
    pub fn current_words(&self) -> Vec<String> {
        self.cache.snapshot()
    }

    /// The word cache itself, for reading without a copy
    pub fn word_cache(&self) -> &WordCache {
        &self.cache
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn corpus_exists(&self, name: &str) -> Result<bool> {
        Ok(self.database()?.find_corpus_id(name)?.is_some())
    }

    /// Delete a stored corpus and its words. The word cache is left untouched.
    pub fn delete_corpus(&self, name: &str) -> Result<bool> {
        let deleted = self.database()?.delete_corpus(name)?;
        if deleted {
            log::info!("Deleted corpus {}", name);
        } else {
            log::warn!("No corpus named {} to delete", name);
        }
        Ok(deleted)
    }

    pub fn list_corpora(&self) -> Result<Vec<CorpusRecord>> {
        self.database()?.list_corpora()
    }

    pub fn stats(&self) -> Result<StoreStats> {
        self.database()?.get_stats()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
