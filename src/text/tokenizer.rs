//! Splitting corpus sources into words
//!
//! The store only needs something that turns a source name into an ordered list
//! of words; [`Tokenizer`] is that seam. [`WordTokenizer`] is the default, which
//! reads the source as a text file.

use crate::config::TokenizerConfig;
use crate::error::{CorpusError, Result};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Turns a corpus source into the ordered sequence of its words
pub trait Tokenizer: Send + Sync {
    /// Parse the source called `source_name`.
    ///
    /// Fails with [`CorpusError::SourceUnreadable`] if the source cannot be read
    /// or parsed.
    fn parse_corpus(&self, source_name: &str) -> Result<Vec<String>>;
}

/// Tokenizer reading a text file and keeping only alphabetic runs
pub struct WordTokenizer {
    config: TokenizerConfig,
    separator_regex: Regex,
}

impl WordTokenizer {
    /// Create a new tokenizer with the given configuration
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let separator_regex = Regex::new(r"[^\p{Alphabetic}]+")
            .map_err(|e| CorpusError::Config(format!("Failed to compile separator regex: {}", e)))?;

        Ok(Self {
            config,
            separator_regex,
        })
    }

    /// Create a tokenizer with default configuration
    pub fn with_default_config() -> Result<Self> {
        Self::new(TokenizerConfig::default())
    }

    /// Split in-memory text into words using this tokenizer's rules
    pub fn tokenize_text(&self, text: &str) -> Vec<String> {
        let text: String = if self.config.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        self.separator_regex
            .split(&text)
            .filter(|word| !word.is_empty())
            .map(|word| {
                if self.config.lowercase {
                    word.to_lowercase()
                } else {
                    word.to_string()
                }
            })
            .filter(|word| word.chars().count() >= self.config.min_word_length)
            .collect()
    }
}

impl Tokenizer for WordTokenizer {
    fn parse_corpus(&self, source_name: &str) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(source_name)
            .map_err(|e| CorpusError::source_unreadable(source_name, e))?;

        let words = self.tokenize_text(&content);
        log::debug!("Tokenized {} into {} words", source_name, words.len());
        Ok(words)
    }
}
