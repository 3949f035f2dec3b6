//! # corpus-store
//!
//! Persistence for word corpora backed by an embedded SQLite database. Each
//! named corpus is ingested at most once; later loads read its words back from
//! the store. Aggregate queries report per-corpus word counts and the most
//! frequent words overall.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use corpus_store::CorpusStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CorpusStore::open("corpus.db")?;
//!
//!     // Tokenized and stored the first time, read back afterwards
//!     store.load_corpus("data/sherlock.txt")?;
//!
//!     for (name, count) in store.frequency_by_corpus()? {
//!         println!("{}: {} words", name, count);
//!     }
//!
//!     for entry in store.top_k_words(5)? {
//!         println!("{} x{}", entry.word, entry.count);
//!     }
//!
//!     println!("{} words cached", store.current_words().len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod storage;
pub mod text;
pub mod utils;

// Re-export main API types
pub use api::{CorpusStore, LoadOutcome};
pub use config::Config;
pub use error::{CorpusError, Result};

// Re-export commonly used types
pub use cache::WordCache;
pub use storage::{CorpusRecord, StoreStats, WordFrequency};
pub use text::{Tokenizer, WordTokenizer};
