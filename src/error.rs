//! Error types for corpus-store
//!
//! Every fallible operation returns [`CorpusError`]. Storage failures are split
//! into faults of the engine itself and violations of the schema's constraints,
//! so callers can tell an unavailable store from a bug in the ingestion protocol.

use thiserror::Error;

/// Main error type for corpus-store operations
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The store could not be opened, queried or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A constraint of the schema was breached (orphaned word, duplicate corpus name)
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The tokenizer could not read or parse a corpus source
    #[error("Source unreadable: {source_name}: {reason}")]
    SourceUnreadable { source_name: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for corpus-store operations
pub type Result<T> = std::result::Result<T, CorpusError>;

impl CorpusError {
    /// Classify a SQLite error, prefixing it with what was being attempted.
    ///
    /// Constraint failures become [`CorpusError::SchemaViolation`]; everything
    /// else is a [`CorpusError::StorageUnavailable`].
    pub fn from_sqlite(context: &str, err: rusqlite::Error) -> Self {
        if is_constraint_violation(&err) {
            CorpusError::SchemaViolation(format!("{}: {}", context, err))
        } else {
            CorpusError::StorageUnavailable(format!("{}: {}", context, err))
        }
    }

    /// Build a [`CorpusError::SourceUnreadable`] for `source_name`
    pub fn source_unreadable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        CorpusError::SourceUnreadable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<rusqlite::Error> for CorpusError {
    fn from(err: rusqlite::Error) -> Self {
        CorpusError::from_sqlite("SQLite error", err)
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CorpusError::source_unreadable("missing.txt", "file not found");
        assert_eq!(
            error.to_string(),
            "Source unreadable: missing.txt: file not found"
        );
    }

    #[test]
    fn test_sqlite_classification() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v TEXT NOT NULL UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let duplicate = conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err();
        match CorpusError::from_sqlite("insert", duplicate) {
            CorpusError::SchemaViolation(msg) => assert!(msg.starts_with("insert: ")),
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }

        let missing = conn.execute("SELECT * FROM nope", []).unwrap_err();
        match CorpusError::from(missing) {
            CorpusError::StorageUnavailable(_) => (),
            other => panic!("Expected StorageUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_error_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let corpus_error = CorpusError::from(io_error);

        match corpus_error {
            CorpusError::Io(_) => (),
            _ => panic!("Expected Io error"),
        }
    }
}
