//! Types for word-aligned suffix arrays
//!
//! A suffix array here holds one entry per word start in the corpus. Entries
//! are byte offsets into the corpus text, so the array costs one word of
//! memory per suffix no matter how long the suffixes are.

use serde::{Deserialize, Serialize};
use std::mem::size_of;

/// Byte position in the corpus text
pub type TextPosition = usize;

/// Suffix array entry - offset of a word start in the corpus
pub type SuffixEntry = TextPosition;

/// Arrays with more suffixes than this are sorted in parallel
pub const DEFAULT_PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// Configuration for suffix array building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixArrayConfig {
    /// Suffix count above which the sort runs on the rayon pool
    pub parallel_sort_threshold: usize,
}

impl Default for SuffixArrayConfig {
    fn default() -> Self {
        Self {
            parallel_sort_threshold: DEFAULT_PARALLEL_SORT_THRESHOLD,
        }
    }
}

/// Sorted word-aligned suffixes of a corpus
///
/// Only [`SuffixArrayBuilder`](super::SuffixArrayBuilder) constructs one, so
/// every instance is sorted and non-empty.
#[derive(Debug, Clone)]
pub struct SuffixArray<'c> {
    pub(super) text: &'c str,
    pub(super) suffixes: Vec<SuffixEntry>,
}

impl<'c> SuffixArray<'c> {
    /// Number of suffixes
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Suffix at sorted index `index`
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    #[inline]
    pub fn suffix(&self, index: usize) -> &'c str {
        &self.text[self.suffixes[index]..]
    }

    /// Suffixes in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &'c str> + '_ {
        self.suffixes.iter().map(|&pos| &self.text[pos..])
    }

    pub fn stats(&self) -> SuffixArrayStats {
        SuffixArrayStats {
            text_size: self.text.len(),
            suffix_count: self.suffixes.len(),
            index_bytes: self.suffixes.len() * size_of::<SuffixEntry>(),
        }
    }
}

/// Statistics about a suffix array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuffixArrayStats {
    pub text_size: usize,
    pub suffix_count: usize,
    /// Memory held by the offsets themselves
    pub index_bytes: usize,
}
