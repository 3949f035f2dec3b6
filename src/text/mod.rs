//! Text processing for corpus-store
//!
//! This module provides the tokenizer seam and the default file tokenizer.

pub mod tokenizer;

// Re-export main types
pub use tokenizer::{Tokenizer, WordTokenizer};
