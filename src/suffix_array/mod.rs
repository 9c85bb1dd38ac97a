//! Word-aligned suffix arrays
//!
//! This module provides the phrase index used for text generation: every
//! suffix of the corpus that starts on a word boundary, sorted byte-wise so
//! that suffixes sharing a leading phrase form one contiguous run.
//!
//! ## Architecture
//!
//! - `builder`: Collects word-start suffixes and sorts them
//! - `search`: Lower-bound phrase search (O(|P| log n))
//! - `sampler`: Reservoir sampling over the run continuing a phrase
//! - `types`: Core type definitions
//!
//! Suffixes are offsets into the corpus, never copies, so the array stays
//! O(corpus length + word count) in memory.

pub mod builder;
pub mod sampler;
pub mod search;
pub mod types;

// Re-exports for convenience
pub use builder::{SuffixArrayBuilder, sort_suffixes, word_starts};
pub use sampler::reservoir_sample;
pub use search::search_key;
pub use types::{
    DEFAULT_PARALLEL_SORT_THRESHOLD, SuffixArray, SuffixArrayConfig, SuffixArrayStats, SuffixEntry,
    TextPosition,
};
