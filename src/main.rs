use anyhow::{Context, Result};
use argot::commands::{self, GenerateOptions};
use argot::output;
use argot::utils::{AppConfig, parse_location};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "argot")]
#[command(about = "Turn Irssi logs into a corpus and generate text from it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Hide progress spinners
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a log and write its message corpus
    Extract {
        /// Irssi log to read
        #[arg(long)]
        log_file: PathBuf,

        /// Corpus file to write
        #[arg(long)]
        out_file: PathBuf,

        /// Stop after this many lines (0 reads the whole log)
        #[arg(long, default_value_t = 0)]
        line_limit: usize,

        /// Timezone the log was written in, e.g. America/Vancouver
        #[arg(long)]
        location: Option<String>,
    },
    /// Parse a log and print a per-kind summary
    Read {
        /// Irssi log to read
        #[arg(long)]
        log_file: PathBuf,

        /// Stop after this many lines (0 reads the whole log)
        #[arg(long, default_value_t = 0)]
        line_limit: usize,

        /// Timezone the log was written in, e.g. America/Vancouver
        #[arg(long)]
        location: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Generate text from a corpus file
    Generate {
        /// Corpus file produced by `extract`
        #[arg(long)]
        file: PathBuf,

        /// Number of phrases to generate
        #[arg(long)]
        sentence_length: Option<usize>,

        /// Words per phrase
        #[arg(short, long)]
        k: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Extract {
            log_file,
            out_file,
            line_limit,
            location,
        } => {
            let tz = resolve_timezone(location.as_deref(), &config)?;
            commands::extract(&log_file, &out_file, line_limit, tz, cli.quiet)?;
        }
        Commands::Read {
            log_file,
            line_limit,
            location,
            json,
            no_color,
        } => {
            let tz = resolve_timezone(location.as_deref(), &config)?;
            let summary = commands::read(&log_file, line_limit, tz, cli.quiet)?;
            if json {
                output::print_summary_json(&summary)?;
            } else {
                output::print_summary(&log_file, &summary, !no_color)?;
            }
        }
        Commands::Generate {
            file,
            sentence_length,
            k,
            seed,
        } => {
            let options = GenerateOptions {
                file,
                sentence_length: sentence_length.unwrap_or(config.sentence_length),
                k: k.unwrap_or(config.k),
                seed,
                parallel_sort_threshold: config.parallel_sort_threshold,
                quiet: cli.quiet,
            };
            let text = commands::generate(&options)?;
            output::print_generated(&text)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_timezone(flag: Option<&str>, config: &AppConfig) -> Result<Tz> {
    let tz = match flag {
        Some(name) => parse_location(name),
        None => config.timezone(),
    };
    tz.context("Invalid timezone location")
}
