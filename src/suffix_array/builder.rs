//! Suffix array builder
//!
//! Builds a word-aligned suffix array in two stages:
//! 1. Collect one suffix per word start (offset 0 and after every space)
//! 2. Sort the suffixes byte-wise, in parallel for large corpora
//!
//! After sorting, all suffixes sharing a leading phrase sit next to each
//! other, which is what the phrase search and sampling rely on.

use super::types::*;
use crate::corpus::Corpus;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Builder for constructing suffix arrays over a corpus
pub struct SuffixArrayBuilder<'c> {
    config: SuffixArrayConfig,
    text: &'c str,
}

impl<'c> SuffixArrayBuilder<'c> {
    /// Create a new suffix array builder with the given configuration
    pub fn new(corpus: &'c Corpus, config: SuffixArrayConfig) -> Self {
        Self {
            config,
            text: corpus.as_str(),
        }
    }

    /// Create a builder with default configuration
    pub fn with_defaults(corpus: &'c Corpus) -> Self {
        Self::new(corpus, SuffixArrayConfig::default())
    }

    /// Build and sort the suffix array
    pub fn build(self) -> SuffixArray<'c> {
        let mut suffixes = word_starts(self.text);
        debug!(suffixes = suffixes.len(), "collected word-start suffixes");

        sort_suffixes(self.text, &mut suffixes, self.config.parallel_sort_threshold);
        debug!("sorted suffixes");

        SuffixArray {
            text: self.text,
            suffixes,
        }
    }
}

/// Offsets of every word start: 0, and each position right after a space
///
/// Yields `spaces + 1` entries. A trailing space produces an entry at
/// `text.len()`, the empty suffix.
pub fn word_starts(text: &str) -> Vec<SuffixEntry> {
    let bytes = text.as_bytes();

    let mut starts = Vec::with_capacity(memchr::memchr_iter(b' ', bytes).count() + 1);
    starts.push(0);
    starts.extend(memchr::memchr_iter(b' ', bytes).map(|i| i + 1));

    starts
}

/// Sort suffix offsets by the full suffix text, byte-wise
///
/// Ties cannot happen between distinct offsets, so an unstable sort is fine.
pub fn sort_suffixes(text: &str, suffixes: &mut [SuffixEntry], parallel_threshold: usize) {
    let bytes = text.as_bytes();

    if suffixes.len() > parallel_threshold {
        suffixes.par_sort_unstable_by(|&a, &b| compare_suffixes(bytes, a, b));
    } else {
        suffixes.sort_unstable_by(|&a, &b| compare_suffixes(bytes, a, b));
    }
}

/// Compare two suffixes lexicographically
#[inline]
fn compare_suffixes(text: &[u8], a: usize, b: usize) -> Ordering {
    text[a..].cmp(&text[b..])
}
