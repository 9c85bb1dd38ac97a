//! Output formatting for log summaries and generated text

use crate::generator::GeneratedText;
use crate::irssi::EntrySummary;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print a per-kind breakdown of a parsed log
pub fn print_summary(path: &std::path::Path, summary: &EntrySummary, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_summary(&mut stdout, path, summary)
}

/// Write the summary to any color-capable writer
pub fn write_summary<W: WriteColor>(
    out: &mut W,
    path: &std::path::Path,
    summary: &EntrySummary,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    writeln!(out, "{}", path.display())?;
    out.reset()?;

    write!(out, "Entries:          ")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "{}", summary.total)?;
    out.reset()?;

    if let (Some(first), Some(last)) = (summary.first_time, summary.last_time) {
        writeln!(out, "First timestamp:  {}", first.format("%Y-%m-%d %H:%M %Z"))?;
        writeln!(out, "Last timestamp:   {}", last.format("%Y-%m-%d %H:%M %Z"))?;
    }

    if summary.by_kind.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Entries by kind:")?;
    for (kind, count) in &summary.by_kind {
        write!(out, "  {:16} ", kind.as_str())?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "{}", count)?;
        out.reset()?;
    }

    Ok(())
}

/// Print the summary as one JSON document
pub fn print_summary_json(summary: &EntrySummary) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, summary)?;
    writeln!(lock)?;
    Ok(())
}

/// Print generated text on a single line
pub fn print_generated(text: &GeneratedText) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    writeln!(lock, "{}", text)?;
    lock.flush()
}
