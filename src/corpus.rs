//! Corpus assembly
//!
//! Turns parsed log entries into the single block of text that the suffix
//! array is built over. Only channel messages contribute; messages whose
//! text starts with a space are dropped, since that is how relay bots and
//! other automated sources show up in the logs.

use crate::irssi::{EntryKind, LogEntry};
use anyhow::{Context, Result};
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorpusError {
    #[error("corpus contains no words")]
    Empty,
}

/// Message text used as the generation source.
///
/// Immutable once built. Suffix arrays hold byte offsets into it rather than
/// copies of the suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    text: String,
}

impl Corpus {
    /// Wrap already assembled text
    ///
    /// The text is kept verbatim; it must contain at least one non-blank word.
    pub fn new(text: impl Into<String>) -> Result<Self, CorpusError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CorpusError::Empty);
        }
        Ok(Self { text })
    }

    /// Assemble a corpus from parsed log entries
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = &'a LogEntry>,
    {
        Self::new(assemble(entries))
    }

    /// Load a pre-extracted corpus file, trimming surrounding whitespace
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Unable to read corpus file: {}", path.display()))?;
        let corpus = Self::new(content.trim())
            .with_context(|| format!("Unusable corpus file: {}", path.display()))?;
        Ok(corpus)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Size of the corpus in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Whether an entry contributes to the corpus
pub fn is_corpus_message(entry: &LogEntry) -> bool {
    entry.kind == EntryKind::Message
        && entry
            .text
            .as_deref()
            .is_some_and(|text| !text.starts_with(' '))
}

/// Words of every qualifying message, in log order, blank words dropped
pub fn corpus_words<'a, I>(entries: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    entries
        .into_iter()
        .filter(|entry| is_corpus_message(entry))
        .filter_map(|entry| entry.text.as_deref())
        .flat_map(|text| text.split(' '))
        .filter(|word| !word.trim().is_empty())
}

/// Concatenate qualifying message text into one space-separated string
pub fn assemble<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut out = String::new();
    for word in corpus_words(entries) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Stream the corpus to a writer
///
/// Words are separated by exactly one space, blank words are dropped, and no
/// trailing separator or newline is written. Returns the number of words.
pub fn write_corpus<'a, I, W>(entries: I, writer: &mut W) -> io::Result<usize>
where
    I: IntoIterator<Item = &'a LogEntry>,
    W: Write,
{
    let mut words = 0;

    for word in corpus_words(entries) {
        if words > 0 {
            writer.write_all(b" ")?;
        }
        writer.write_all(word.as_bytes())?;
        words += 1;
    }

    Ok(words)
}

/// Write the corpus for `entries` to `path`, returning the word count
pub fn write_corpus_file<'a, I>(entries: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let file = File::create(path)
        .with_context(|| format!("Unable to open output file: {}", path.display()))?;
    let mut writer = BufWriter::with_capacity(65536, file);

    let words = write_corpus(entries, &mut writer)
        .with_context(|| format!("Unable to write corpus: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Unable to write corpus: {}", path.display()))?;

    Ok(words)
}
