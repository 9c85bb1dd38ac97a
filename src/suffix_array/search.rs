//! Phrase search over a sorted suffix array
//!
//! Phrases are searched with a trailing space appended, so a match has to
//! end on a word boundary: `"the cat"` finds `"the cat sat"` but not
//! `"the cats"` or `"theatre cats"`.

use super::types::*;
use std::ops::Range;

/// Search key for a phrase: the phrase plus one trailing space
pub fn search_key(phrase: &str) -> String {
    let mut key = String::with_capacity(phrase.len() + 1);
    key.push_str(phrase);
    key.push(' ');
    key
}

impl<'c> SuffixArray<'c> {
    /// Lower bound of `phrase + " "`
    ///
    /// Returns `None` when the bound falls past the end of the array, meaning
    /// no suffix can continue the phrase. A returned index may still not
    /// match; the run starting there can be empty.
    pub fn locate(&self, phrase: &str) -> Option<usize> {
        let key = search_key(phrase);
        let idx = self.lower_bound(key.as_bytes());
        (idx < self.len()).then_some(idx)
    }

    /// Range `[lo, hi)` of suffixes that start with `phrase + " "`
    pub fn search(&self, phrase: &str) -> Range<usize> {
        let key = search_key(phrase);
        let lo = self.lower_bound(key.as_bytes());
        let hi = self.upper_bound(key.as_bytes(), lo);
        lo..hi
    }

    /// Number of suffixes continuing `phrase`
    pub fn count_matches(&self, phrase: &str) -> usize {
        self.search(phrase).len()
    }

    /// First index whose suffix is not less than `key`
    ///
    /// Only the first `key.len()` bytes of each suffix take part, so every
    /// suffix that has `key` as a prefix compares equal and the result is the
    /// start of that run.
    pub fn lower_bound(&self, key: &[u8]) -> usize {
        let mut lo = 0;
        let mut hi = self.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let suffix = self.suffix(mid).as_bytes();

            // A suffix shorter than the key that matches it up to its end is
            // a proper prefix of the key, and so sorts before it
            let cmp_len = key.len().min(suffix.len());
            let suffix_prefix = &suffix[..cmp_len];

            if suffix_prefix < key {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// First index at or after `start` whose suffix does NOT start with `key`
    fn upper_bound(&self, key: &[u8], start: usize) -> usize {
        let mut lo = start;
        let mut hi = self.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;

            if self.suffix(mid).as_bytes().starts_with(key) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::suffix_array::SuffixArrayBuilder;

    const TEXT: &str = "the cat sat on the mat the cat ran";

    fn with_array<T>(text: &str, f: impl FnOnce(&SuffixArray<'_>) -> T) -> T {
        let corpus = Corpus::new(text).unwrap();
        let array = SuffixArrayBuilder::with_defaults(&corpus).build();
        f(&array)
    }

    /// Every index below the bound sorts before the key, the run after it
    /// has the key as a prefix, and nothing after the run does
    fn assert_lower_bound_partition(array: &SuffixArray<'_>, phrase: &str) {
        let key = search_key(phrase);
        let lo = array.lower_bound(key.as_bytes());
        let run = array.search(phrase);
        assert_eq!(run.start, lo);

        for i in 0..lo {
            assert!(array.suffix(i).as_bytes() < key.as_bytes(), "index {i} for {phrase:?}");
        }
        for i in run.clone() {
            assert!(array.suffix(i).starts_with(&key), "index {i} for {phrase:?}");
        }
        for i in run.end..array.len() {
            assert!(!array.suffix(i).starts_with(&key), "index {i} for {phrase:?}");
        }
    }

    #[test]
    fn test_search_key() {
        assert_eq!(search_key("the cat"), "the cat ");
    }

    #[test]
    fn test_locate_run() {
        with_array(TEXT, |array| {
            let run = array.search("the cat");
            assert_eq!(run.len(), 2);
            assert_eq!(array.suffix(run.start), "the cat ran");
            assert_eq!(array.suffix(run.start + 1), "the cat sat on the mat the cat ran");
            assert_eq!(array.locate("the cat"), Some(run.start));
        });
    }

    #[test]
    fn test_lower_bound_partition() {
        with_array(TEXT, |array| {
            for phrase in ["the cat", "the", "cat", "on the", "mat the", "zebra", "a", "ran"] {
                assert_lower_bound_partition(array, phrase);
            }
        });
    }

    #[test]
    fn test_word_boundary() {
        with_array("theatre cats are the best the cats", |array| {
            assert_eq!(array.count_matches("the cat"), 0);
            assert_eq!(array.count_matches("the cats"), 0);
            // "the best ..." and "the cats", never "theatre ..."
            assert_eq!(array.count_matches("the"), 2);
        });
    }

    #[test]
    fn test_past_the_end_is_not_found() {
        with_array(TEXT, |array| {
            assert_eq!(array.locate("zebra"), None);
        });
    }

    #[test]
    fn test_final_word_has_no_continuation() {
        with_array(TEXT, |array| {
            // "ran" ends the corpus without a trailing space
            assert_eq!(array.count_matches("ran"), 0);
        });
    }

    #[test]
    fn test_proper_prefix_of_key_sorts_before() {
        // The suffix "the" is a proper prefix of the key "the cat " and must
        // land below the bound, not at it
        with_array("the cat sat the a b the", |array| {
            assert_lower_bound_partition(array, "the cat");
            assert_eq!(array.count_matches("the cat"), 1);
            let lo = array.locate("the cat").unwrap();
            assert_eq!(array.suffix(lo), "the cat sat the a b the");
        });
    }
}
