//! Storage functionality for corpus-store
//!
//! This module provides the SQLite-backed relations for corpora and their words.

pub mod database;
pub mod schema;

use serde::Serialize;

// Re-export main types
pub use database::Database;

/// A stored corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusRecord {
    /// Surrogate key assigned on insertion
    pub id: i64,

    /// Source identifier the corpus was loaded from
    pub name: String,
}

/// Number of occurrences of one word across all corpora
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
}

/// Store statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    /// Number of corpus rows
    pub corpus_count: usize,

    /// Number of word rows
    pub word_count: usize,

    /// Number of distinct word texts
    pub distinct_words: usize,

    /// Size of the database file in bytes
    pub file_size_bytes: u64,
}
