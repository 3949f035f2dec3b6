//! SQLite database operations for corpus-store
//!
//! This module owns the single connection to the embedded store. It creates the
//! schema on open and exposes the corpus and word operations the store API is
//! built from.

use crate::config::StorageConfig;
use crate::error::{CorpusError, Result};
use crate::storage::schema::*;
use crate::storage::{CorpusRecord, StoreStats, WordFrequency};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Database connection and operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path` with default settings
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(path, &StorageConfig::default())
    }

    /// Open (or create) the database at `path`
    pub fn with_config<P: AsRef<Path>>(path: P, config: &StorageConfig) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| CorpusError::from_sqlite("Failed to open database", e))?;

        let mut db = Self { conn };
        db.initialize(config)?;
        log::info!("Opened corpus database at {}", path.as_ref().display());
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CorpusError::from_sqlite("Failed to create in-memory database", e))?;

        let mut db = Self { conn };
        db.initialize(&StorageConfig::default())?;
        Ok(db)
    }

    /// Apply connection pragmas and create the schema if it is missing
    fn initialize(&mut self, config: &StorageConfig) -> Result<()> {
        config.validate()?;

        // In-memory databases answer "memory" whatever mode is requested
        let _: String = self
            .conn
            .query_row(
                &format!("PRAGMA journal_mode={}", config.journal_mode),
                [],
                |row| row.get(0),
            )
            .map_err(|e| CorpusError::from_sqlite("Failed to set journal mode", e))?;

        self.conn
            .pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| CorpusError::from_sqlite("Failed to enable foreign keys", e))?;

        self.conn
            .busy_timeout(Duration::from_millis(u64::from(config.busy_timeout_ms)))
            .map_err(|e| CorpusError::from_sqlite("Failed to set busy timeout", e))?;

        self.conn
            .execute_batch(CREATE_CORPUS_TABLE)
            .map_err(|e| CorpusError::from_sqlite("Failed to create corpus table", e))?;

        self.conn
            .execute_batch(CREATE_WORD_TABLE)
            .map_err(|e| CorpusError::from_sqlite("Failed to create word table", e))?;

        self.conn
            .execute_batch(CREATE_WORD_INDEXES)
            .map_err(|e| CorpusError::from_sqlite("Failed to create indexes", e))?;

        self.conn
            .pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(|e| CorpusError::from_sqlite("Failed to set schema version", e))?;

        log::debug!("Database initialized with schema version {}", SCHEMA_VERSION);
        Ok(())
    }

    /// Schema version recorded in the file
    pub fn schema_version(&self) -> Result<i64> {
        self.conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|e| CorpusError::from_sqlite("Failed to read schema version", e))
    }

    /// Look up the id of the corpus called `name`
    pub fn find_corpus_id(&self, name: &str) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "SELECT id FROM corpus WHERE name = ?1 LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| CorpusError::from_sqlite("Failed to look up corpus", e))
    }

    /// Insert a corpus and all of its words in one transaction.
    ///
    /// Either the corpus row and every word row are stored, or nothing is.
    pub fn insert_corpus(&mut self, name: &str, words: &[String]) -> Result<i64> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| CorpusError::from_sqlite("Failed to start transaction", e))?;

        tx.execute("INSERT INTO corpus (name) VALUES (?1)", params![name])
            .map_err(|e| CorpusError::from_sqlite(&format!("Failed to insert corpus {}", name), e))?;
        let corpus_id = tx.last_insert_rowid();

        {
            let mut stmt = tx
                .prepare("INSERT INTO word (corpus_id, text) VALUES (?1, ?2)")
                .map_err(|e| CorpusError::from_sqlite("Failed to prepare statement", e))?;

            for word in words {
                stmt.execute(params![corpus_id, word]).map_err(|e| {
                    CorpusError::from_sqlite(&format!("Failed to insert word {:?}", word), e)
                })?;
            }
        }

        tx.commit()
            .map_err(|e| CorpusError::from_sqlite("Failed to commit transaction", e))?;

        log::info!(
            "Inserted corpus {} (id {}) with {} words",
            name,
            corpus_id,
            words.len()
        );
        Ok(corpus_id)
    }

    /// Words of the corpus called `name`, in storage order
    pub fn words_for_corpus(&self, name: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT word.text FROM word JOIN corpus ON word.corpus_id = corpus.id \
                 WHERE corpus.name = ?1 ORDER BY word.rowid",
            )
            .map_err(|e| CorpusError::from_sqlite("Failed to prepare query", e))?;

        let rows = stmt
            .query_map(params![name], |row| row.get::<_, String>(0))
            .map_err(|e| CorpusError::from_sqlite("Failed to query corpus words", e))?;

        let mut result = Vec::new();
        for word in rows {
            result.push(word.map_err(|e| CorpusError::from_sqlite("Failed to read word row", e))?);
        }

        Ok(result)
    }

    /// Every stored word, in storage order
    pub fn all_words(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT text FROM word ORDER BY rowid")
            .map_err(|e| CorpusError::from_sqlite("Failed to prepare query", e))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| CorpusError::from_sqlite("Failed to query words", e))?;

        let mut result = Vec::new();
        for word in rows {
            result.push(word.map_err(|e| CorpusError::from_sqlite("Failed to read word row", e))?);
        }

        Ok(result)
    }

    /// Delete the corpus called `name`; its words go with it
    pub fn delete_corpus(&self, name: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM corpus WHERE name = ?1", params![name])
            .map_err(|e| CorpusError::from_sqlite(&format!("Failed to delete corpus {}", name), e))?;

        Ok(deleted > 0)
    }

    /// All corpora ordered by id
    pub fn list_corpora(&self) -> Result<Vec<CorpusRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM corpus ORDER BY id")
            .map_err(|e| CorpusError::from_sqlite("Failed to prepare query", e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CorpusRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| CorpusError::from_sqlite("Failed to list corpora", e))?;

        let mut result = Vec::new();
        for record in rows {
            result.push(record.map_err(|e| CorpusError::from_sqlite("Failed to read corpus row", e))?);
        }

        Ok(result)
    }

    /// Number of words per corpus name. Corpora without words report zero.
    pub fn word_counts_by_corpus(&self) -> Result<BTreeMap<String, u64>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT corpus.name, COUNT(word.corpus_id) FROM corpus \
                 LEFT JOIN word ON word.corpus_id = corpus.id \
                 GROUP BY corpus.id, corpus.name",
            )
            .map_err(|e| CorpusError::from_sqlite("Failed to prepare query", e))?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
            .map_err(|e| CorpusError::from_sqlite("Failed to count words by corpus", e))?;

        let mut result = BTreeMap::new();
        for row in rows {
            let (name, count) =
                row.map_err(|e| CorpusError::from_sqlite("Failed to read count row", e))?;
            result.insert(name, count as u64);
        }

        Ok(result)
    }

    /// Number of distinct word texts per corpus name
    pub fn distinct_counts_by_corpus(&self) -> Result<BTreeMap<String, u64>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT corpus.name, COUNT(DISTINCT word.text) FROM corpus \
                 LEFT JOIN word ON word.corpus_id = corpus.id \
                 GROUP BY corpus.id, corpus.name",
            )
            .map_err(|e| CorpusError::from_sqlite("Failed to prepare query", e))?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
            .map_err(|e| CorpusError::from_sqlite("Failed to count distinct words", e))?;

        let mut result = BTreeMap::new();
        for row in rows {
            let (name, count) =
                row.map_err(|e| CorpusError::from_sqlite("Failed to read count row", e))?;
            result.insert(name, count as u64);
        }

        Ok(result)
    }

    /// The `limit` most frequent words, most frequent first.
    ///
    /// Equal counts are ordered by word text ascending.
    pub fn top_words(&self, limit: usize) -> Result<Vec<WordFrequency>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT text, COUNT(*) AS occurrences FROM word \
                 GROUP BY text ORDER BY occurrences DESC, text ASC LIMIT ?1",
            )
            .map_err(|e| CorpusError::from_sqlite("Failed to prepare query", e))?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(WordFrequency {
                    word: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })
            .map_err(|e| CorpusError::from_sqlite("Failed to query top words", e))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| CorpusError::from_sqlite("Failed to read frequency row", e))?);
        }

        Ok(result)
    }

    /// Get database statistics
    pub fn get_stats(&self) -> Result<StoreStats> {
        let (corpus_count, word_count, distinct_words): (i64, i64, i64) = self
            .conn
            .query_row(
                "SELECT (SELECT COUNT(*) FROM corpus), (SELECT COUNT(*) FROM word), \
                 (SELECT COUNT(DISTINCT text) FROM word)",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .map_err(|e| CorpusError::from_sqlite("Failed to count rows", e))?;

        let file_size: i64 = self
            .conn
            .query_row(
                "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
                [],
                |row| row.get(0),
            )
            .map_err(|e| CorpusError::from_sqlite("Failed to get database size", e))?;

        Ok(StoreStats {
            corpus_count: corpus_count as usize,
            word_count: word_count as usize,
            distinct_words: distinct_words as usize,
            file_size_bytes: file_size as u64,
        })
    }
}
