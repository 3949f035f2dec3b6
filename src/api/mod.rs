//! API layer for corpus-store
//!
//! This module provides the public interface for loading corpora and querying
//! their word frequencies.

pub mod query;
pub mod store;

// Re-export main API types
pub use store::{CorpusStore, LoadOutcome};
