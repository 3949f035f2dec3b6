//! Configuration for corpus-store
//!
//! All settings have sensible defaults and can be overridden from a JSON file.

use crate::error::{CorpusError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Journal modes accepted by `PRAGMA journal_mode`
const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite connection settings
    pub storage: StorageConfig,

    /// Rules for the default word tokenizer
    pub tokenizer: TokenizerConfig,

    /// Query engine settings
    pub query: QueryConfig,
}

/// SQLite connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Value for `PRAGMA journal_mode`
    pub journal_mode: String,

    /// Milliseconds to wait on a locked database before failing
    pub busy_timeout_ms: u32,

    /// Enforce foreign keys; the cascade from corpus to word depends on it
    pub foreign_keys: bool,
}

impl StorageConfig {
    /// Check that the pragmas can be applied as given
    pub fn validate(&self) -> Result<()> {
        let mode = self.journal_mode.to_uppercase();
        if !JOURNAL_MODES.contains(&mode.as_str()) {
            return Err(CorpusError::Config(format!(
                "Unsupported journal mode: {:?}",
                self.journal_mode
            )));
        }

        if !self.foreign_keys {
            return Err(CorpusError::Config(
                "foreign_keys must stay enabled for cascading corpus deletes".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            journal_mode: "WAL".to_string(),
            busy_timeout_ms: 5000,
            foreign_keys: true,
        }
    }
}

/// Rules for splitting a source into words
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Lowercase every word
    pub lowercase: bool,

    /// Words shorter than this many characters are dropped
    pub min_word_length: usize,

    /// Apply NFC normalization before splitting
    pub normalize_unicode: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_word_length: 1,
            normalize_unicode: true,
        }
    }
}

/// Query engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    /// `k` used when a caller does not pass one to the top-K query
    pub default_top_k: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { default_top_k: 5 }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write this configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the settings can be applied
    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;

        if self.query.default_top_k == 0 {
            return Err(CorpusError::Config(
                "default_top_k must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
