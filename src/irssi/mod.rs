//! Irssi channel log parsing
//!
//! ## Architecture
//!
//! - `types`: `LogEntry`, `EntryKind` and the per-kind summary
//! - `matchers`: ordered table of named line matchers
//! - `parser`: stateful line parser that tracks the current date

pub mod matchers;
pub mod parser;
pub mod types;

pub use parser::{LogParser, ParseError, parse_log, parse_log_file, summarize};
pub use types::{EntryKind, EntrySummary, LogEntry};
