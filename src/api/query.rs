//! Aggregate queries over stored corpora
//!
//! These read straight from the store and never touch the word cache.

use crate::api::store::CorpusStore;
use crate::error::Result;
use crate::storage::WordFrequency;
use std::collections::BTreeMap;

impl CorpusStore {
    /// Number of stored words per corpus name; corpora without words map to 0
    pub fn frequency_by_corpus(&self) -> Result<BTreeMap<String, u64>> {
        let counts = self.database()?.word_counts_by_corpus()?;
        log::debug!("Counted words for {} corpora", counts.len());
        Ok(counts)
    }

    /// Number of distinct words per corpus name
    pub fn vocabulary_by_corpus(&self) -> Result<BTreeMap<String, u64>> {
        self.database()?.distinct_counts_by_corpus()
    }

    /// The `k` most frequent words across all corpora, most frequent first.
    ///
    /// Words with equal counts are ordered by text, ascending.
    pub fn top_k_words(&self, k: usize) -> Result<Vec<WordFrequency>> {
        let top = self.database()?.top_words(k)?;
        log::debug!("Top {} words: {} returned", k, top.len());
        Ok(top)
    }

    /// [`Self::top_k_words`] as a word-to-count map
    pub fn top_k_map(&self, k: usize) -> Result<BTreeMap<String, u64>> {
        Ok(self
            .top_k_words(k)?
            .into_iter()
            .map(|f| (f.word, f.count))
            .collect())
    }

    /// [`Self::top_k_words`] with the configured default `k`
    pub fn top_words(&self) -> Result<Vec<WordFrequency>> {
        self.top_k_words(self.config.query.default_top_k)
    }
}
