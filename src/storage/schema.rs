//! Database schema definitions

/// Database schema version, stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

/// SQL for creating the corpus table. `name` is the dedup key for ingestion.
pub const CREATE_CORPUS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS corpus (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
"#;

/// SQL for creating the word table, one row per token occurrence
pub const CREATE_WORD_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS word (
    corpus_id INTEGER NOT NULL,
    text TEXT NOT NULL,
    FOREIGN KEY (corpus_id) REFERENCES corpus (id) ON DELETE CASCADE
);
"#;

/// SQL for creating indexes on the word table for per-corpus reads and grouping
pub const CREATE_WORD_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_word_corpus ON word(corpus_id);
CREATE INDEX IF NOT EXISTS idx_word_text ON word(text);
"#;
