//! Subcommand drivers: extract, read and generate

use crate::corpus::{Corpus, write_corpus_file};
use crate::generator::{GeneratedText, GeneratorConfig, TextGenerator};
use crate::irssi::{EntrySummary, parse_log_file, summarize};
use crate::suffix_array::{SuffixArrayBuilder, SuffixArrayConfig};
use crate::utils::progress::stage_spinner;
use anyhow::Result;
use chrono_tz::Tz;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options for `argot generate`
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub file: PathBuf,
    pub sentence_length: usize,
    pub k: usize,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    pub parallel_sort_threshold: usize,
    pub quiet: bool,
}

/// Parse a log and write its corpus to `out_file`, returning the word count
pub fn extract(
    log_file: &Path,
    out_file: &Path,
    line_limit: usize,
    tz: Tz,
    quiet: bool,
) -> Result<usize> {
    let spinner = stage_spinner("Parsing log...", quiet);
    let entries = parse_log_file(log_file, line_limit, tz);
    spinner.finish_and_clear();
    let entries = entries?;

    let spinner = stage_spinner("Writing corpus...", quiet);
    let words = write_corpus_file(&entries, out_file);
    spinner.finish_and_clear();
    let words = words?;

    if words == 0 {
        warn!(path = %log_file.display(), "log contains no usable messages");
    }
    info!(words, path = %out_file.display(), "wrote corpus");

    Ok(words)
}

/// Parse a log and summarize it by entry kind
pub fn read(log_file: &Path, line_limit: usize, tz: Tz, quiet: bool) -> Result<EntrySummary> {
    let spinner = stage_spinner("Parsing log...", quiet);
    let entries = parse_log_file(log_file, line_limit, tz);
    spinner.finish_and_clear();

    Ok(summarize(&entries?))
}

/// Load a corpus, index it and generate text from it
///
/// Parameters are validated before the corpus file is touched.
pub fn generate(options: &GenerateOptions) -> Result<GeneratedText> {
    let config = GeneratorConfig::new(options.sentence_length, options.k)?;

    let spinner = stage_spinner("Loading corpus...", options.quiet);
    let corpus = Corpus::open(&options.file);
    spinner.finish_and_clear();
    let corpus = corpus?;
    info!(bytes = corpus.len(), path = %options.file.display(), "loaded corpus");

    let spinner = stage_spinner("Building suffix array...", options.quiet);
    let array = SuffixArrayBuilder::new(
        &corpus,
        SuffixArrayConfig {
            parallel_sort_threshold: options.parallel_sort_threshold,
        },
    )
    .build();
    spinner.finish_and_clear();

    let stats = array.stats();
    info!(
        suffixes = stats.suffix_count,
        text_bytes = stats.text_size,
        index_bytes = stats.index_bytes,
        "built suffix array"
    );

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    Ok(TextGenerator::new(&array, config, rng).generate())
}
