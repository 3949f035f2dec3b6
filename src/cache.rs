//! In-memory word cache
//!
//! The cache is the working set of words handed to downstream consumers. It is
//! append-only for the lifetime of its owner and never deduplicates: loading the
//! same corpus twice appends its words twice.

use std::sync::RwLock;

/// Append-only sequence of words shared between loader calls
#[derive(Debug, Default)]
pub struct WordCache {
    words: RwLock<Vec<String>>,
}

impl WordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `words` in the order given
    pub fn extend<I>(&self, words: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut guard = self.words.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = guard.len();
        guard.extend(words);
        log::debug!("Word cache grew from {} to {} words", before, guard.len());
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Vec<String> {
        self.read(|words| words.to_vec())
    }

    pub fn len(&self) -> usize {
        self.read(|words| words.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the cached words without copying them
    pub fn read<R>(&self, f: impl FnOnce(&[String]) -> R) -> R {
        let guard = self.words.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }
}
