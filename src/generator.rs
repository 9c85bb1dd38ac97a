//! Text generation from a suffix array
//!
//! Generation keeps a k-word phrase as its state. Each step looks the phrase
//! up, samples one suffix continuing it, and takes the k words after the
//! phrase as the next state. When nothing usable continues the phrase, the
//! step starts fresh from a random suffix instead.

use crate::suffix_array::SuffixArray;
use crate::utils::{k_words, word_count};
use rand::Rng;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Fresh-start draws before falling back to a linear scan
const MAX_REDRAWS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("sentence length must be greater than 0")]
    InvalidLength,
    #[error("k must be greater than 0")]
    InvalidContextWidth,
}

/// Validated generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    length: usize,
    k: usize,
}

impl GeneratorConfig {
    /// `length` phrases of `k` words each; both must be non-zero
    pub fn new(length: usize, k: usize) -> Result<Self, GenerateError> {
        if length == 0 {
            return Err(GenerateError::InvalidLength);
        }
        if k == 0 {
            return Err(GenerateError::InvalidContextWidth);
        }
        Ok(Self { length, k })
    }

    /// Number of phrases to generate
    pub fn length(&self) -> usize {
        self.length
    }

    /// Words per phrase
    pub fn k(&self) -> usize {
        self.k
    }
}

/// Why a step could not continue the previous phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// No suffix continues the phrase
    NotFound,
    /// The sampled continuation had fewer than k words
    Degenerate,
}

/// How a generated phrase was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// First phrase, drawn at random
    Seed,
    /// Continued from the previous phrase
    Continued,
    /// Drawn at random after the previous phrase could not be continued
    Fallback(Fallback),
}

/// Phrases produced by one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedText {
    phrases: Vec<String>,
    steps: Vec<Step>,
}

impl GeneratedText {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            phrases: Vec::with_capacity(capacity),
            steps: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, phrase: String, step: Step) {
        self.phrases.push(phrase);
        self.steps.push(step);
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps that had to start fresh mid-run
    pub fn fallback_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Fallback(_)))
            .count()
    }

    pub fn word_count(&self) -> usize {
        self.phrases.iter().map(|p| word_count(p)).sum()
    }
}

impl fmt::Display for GeneratedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phrase) in self.phrases.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(phrase)?;
        }
        Ok(())
    }
}

/// Drives phrase selection over a sorted suffix array
pub struct TextGenerator<'a, 'c, R> {
    array: &'a SuffixArray<'c>,
    config: GeneratorConfig,
    rng: R,
}

impl<'a, 'c, R: Rng> TextGenerator<'a, 'c, R> {
    pub fn new(array: &'a SuffixArray<'c>, config: GeneratorConfig, rng: R) -> Self {
        Self { array, config, rng }
    }

    /// Run exactly `length` steps
    pub fn generate(&mut self) -> GeneratedText {
        let length = self.config.length();
        let mut text = GeneratedText::with_capacity(length);
        let mut phrase: Option<String> = None;

        for _ in 0..length {
            let (next, step) = match phrase.as_deref() {
                None => (self.fresh_phrase(), Step::Seed),
                Some(current) => match self.continue_phrase(current) {
                    Ok(next) => (next, Step::Continued),
                    Err(reason) => {
                        let next = self.fresh_phrase();
                        debug!(phrase = current, ?reason, chose = %next, "picked at random");
                        (next, Step::Fallback(reason))
                    }
                },
            };

            text.push(next.clone(), step);
            phrase = Some(next);
        }

        info!(
            phrases = text.phrases().len(),
            words = text.word_count(),
            fallbacks = text.fallback_count(),
            "generated text"
        );

        text
    }

    /// First k words of a uniformly random suffix
    ///
    /// Suffixes with fewer than k words (the last few of the corpus, or the
    /// empty suffix after a trailing space) are redrawn.
    pub fn fresh_phrase(&mut self) -> String {
        let k = self.config.k();
        let count = self.array.len();

        for _ in 0..MAX_REDRAWS {
            let idx = self.rng.gen_range(0..count);
            let phrase = k_words(self.array.suffix(idx), 0, k);
            if word_count(&phrase) == k {
                return phrase;
            }
        }

        // Few suffixes hold k words; take the first that does, or the longest
        // phrase when the whole corpus is shorter than k words
        let mut longest = String::new();
        for suffix in self.array.iter() {
            let phrase = k_words(suffix, 0, k);
            let words = word_count(&phrase);
            if words == k {
                return phrase;
            }
            if words > word_count(&longest) {
                longest = phrase;
            }
        }
        longest
    }

    /// Sample a continuation of `phrase`: the k words following it in a
    /// random suffix that starts with it
    ///
    /// The result can be shorter than k words when the suffix ends early.
    pub fn extend(&mut self, phrase: &str) -> Option<String> {
        let k = self.config.k();
        let suffix = self.array.sample_continuation(phrase, &mut self.rng)?;
        Some(k_words(suffix, word_count(phrase), k))
    }

    /// Next phrase after `phrase`, or why there is none
    pub fn continue_phrase(&mut self, phrase: &str) -> Result<String, Fallback> {
        let next = self.extend(phrase).ok_or(Fallback::NotFound)?;
        if word_count(&next) < self.config.k() {
            return Err(Fallback::Degenerate);
        }
        Ok(next)
    }
}
