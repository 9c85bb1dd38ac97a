//! Uniform sampling of phrase continuations
//!
//! The suffixes continuing a phrase form one contiguous run in the sorted
//! array. The run is walked once from its lower bound and one suffix kept
//! by reservoir sampling, so the run length never has to be known up front.

use super::search::search_key;
use super::types::*;
use rand::Rng;

/// Pick one item uniformly from a sequence of unknown length
///
/// The j-th item (from 0) replaces the held one with probability 1/(j+1).
/// Returns `None` for an empty sequence.
pub fn reservoir_sample<I, R>(items: I, rng: &mut R) -> Option<I::Item>
where
    I: IntoIterator,
    R: Rng + ?Sized,
{
    let mut chosen = None;

    for (seen, item) in items.into_iter().enumerate() {
        if rng.gen_range(0..=seen) == 0 {
            chosen = Some(item);
        }
    }

    chosen
}

impl<'c> SuffixArray<'c> {
    /// Sample one suffix continuing `phrase`, scanning from index `start`
    ///
    /// `start` should be the phrase's lower bound. Returns `None` when the
    /// run there is empty.
    pub fn sample_extension<R: Rng + ?Sized>(
        &self,
        start: usize,
        phrase: &str,
        rng: &mut R,
    ) -> Option<&'c str> {
        let key = search_key(phrase);
        let text = self.text;

        let run = self
            .suffixes
            .get(start..)?
            .iter()
            .map(|&pos| &text[pos..])
            .take_while(|suffix| suffix.starts_with(key.as_str()));

        reservoir_sample(run, rng)
    }

    /// Locate `phrase` and sample one of its continuations
    pub fn sample_continuation<R: Rng + ?Sized>(&self, phrase: &str, rng: &mut R) -> Option<&'c str> {
        let start = self.locate(phrase)?;
        self.sample_extension(start, phrase, rng)
    }
}
