//! Irssi log parser
//!
//! Lines are matched against the table in [`super::matchers`]. The parser
//! carries the current date between lines: `--- Log opened` and
//! `--- Day changed` headers set it, and every `HH:MM` line is placed on it.

use super::matchers::{TimeSource, find_matcher};
use super::types::{EntryKind, EntrySummary, LogEntry};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Timestamp layout of `--- Log opened` / `--- Log closed` headers
pub const HEADER_LAYOUT: &str = "%a %b %d %H:%M:%S %Y";

/// Date layout of `--- Day changed` headers
pub const DATE_LAYOUT: &str = "%a %b %d %Y";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line_number}: unrecognized line: {line}")]
    Unrecognized { line_number: usize, line: String },

    #[error("line {line_number}: unable to parse timestamp {stamp:?}: {source}")]
    Timestamp {
        line_number: usize,
        stamp: String,
        source: chrono::ParseError,
    },

    #[error("line {line_number}: invalid clock time {hour}:{minute}")]
    Clock {
        line_number: usize,
        hour: String,
        minute: String,
    },

    #[error("line {line_number}: local time {local} does not exist in {tz}")]
    LocalTime {
        line_number: usize,
        local: NaiveDateTime,
        tz: &'static str,
    },

    #[error("unable to read line {line_number}: {source}")]
    Io {
        line_number: usize,
        source: io::Error,
    },
}

/// Stateful line parser for one log
pub struct LogParser {
    tz: Tz,
    current_date: Option<NaiveDate>,
    line_number: usize,
}

impl LogParser {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            current_date: None,
            line_number: 0,
        }
    }

    /// Start from a known date, as if a header had already been seen
    pub fn with_date(tz: Tz, date: NaiveDate) -> Self {
        Self {
            current_date: Some(date),
            ..Self::new(tz)
        }
    }

    /// Date that clock-only lines are currently placed on
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    /// Number of lines parsed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Parse the next line of the log
    pub fn parse_line(&mut self, line: &str) -> Result<LogEntry, ParseError> {
        self.line_number += 1;
        let line_number = self.line_number;

        let unrecognized = || ParseError::Unrecognized {
            line_number,
            line: line.to_string(),
        };

        let matcher = find_matcher(line).ok_or_else(unrecognized)?;
        let caps = matcher.captures(line).ok_or_else(unrecognized)?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        let time = match matcher.time {
            TimeSource::Header => {
                let stamp = &caps["stamp"];
                let naive = NaiveDateTime::parse_from_str(stamp, HEADER_LAYOUT).map_err(
                    |source| ParseError::Timestamp {
                        line_number,
                        stamp: stamp.to_string(),
                        source,
                    },
                )?;
                Some(self.localize(naive)?)
            }
            TimeSource::Date => {
                let stamp = &caps["stamp"];
                let date = NaiveDate::parse_from_str(stamp, DATE_LAYOUT).map_err(|source| {
                    ParseError::Timestamp {
                        line_number,
                        stamp: stamp.to_string(),
                        source,
                    }
                })?;
                Some(self.localize(date.and_time(NaiveTime::MIN))?)
            }
            TimeSource::Clock => self.clock_time(&caps["hour"], &caps["minute"])?,
            TimeSource::None => None,
        };

        if matches!(matcher.kind, EntryKind::LogOpen | EntryKind::DayChange) {
            self.current_date = time.map(|t| t.date_naive());
        }

        Ok(LogEntry {
            line: line.to_string(),
            time,
            kind: matcher.kind,
            channel: field("channel"),
            nick: field("nick"),
            user_host: field("user_host"),
            text: field("text"),
        })
    }

    /// Place an `HH:MM` clock on the current date
    fn clock_time(&self, hour: &str, minute: &str) -> Result<Option<DateTime<Tz>>, ParseError> {
        let invalid = || ParseError::Clock {
            line_number: self.line_number,
            hour: hour.to_string(),
            minute: minute.to_string(),
        };

        let h: u32 = hour.parse().map_err(|_| invalid())?;
        let m: u32 = minute.parse().map_err(|_| invalid())?;
        let clock = NaiveTime::from_hms_opt(h, m, 0).ok_or_else(invalid)?;

        match self.current_date {
            Some(date) => self.localize(date.and_time(clock)).map(Some),
            None => Ok(None),
        }
    }

    /// Local wall time to an instant; ambiguous times take the earlier one
    fn localize(&self, local: NaiveDateTime) -> Result<DateTime<Tz>, ParseError> {
        let tz = self.tz;
        tz.from_local_datetime(&local)
            .earliest()
            // Wall times skipped by a DST jump move forward past it
            .or_else(|| tz.from_local_datetime(&(local + TimeDelta::hours(1))).earliest())
            .ok_or(ParseError::LocalTime {
                line_number: self.line_number,
                local,
                tz: self.tz.name(),
            })
    }
}

/// Parse an entire log, stopping after `line_limit` lines (0 for no limit)
///
/// Invalid UTF-8 is replaced rather than rejected; IRC logs routinely mix
/// encodings.
pub fn parse_log<R: BufRead>(
    mut reader: R,
    line_limit: usize,
    tz: Tz,
) -> Result<Vec<LogEntry>, ParseError> {
    let mut parser = LogParser::new(tz);
    let mut entries = Vec::new();
    let mut buf = Vec::with_capacity(512);

    loop {
        if line_limit > 0 && parser.line_number() >= line_limit {
            break;
        }

        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ParseError::Io {
                line_number: parser.line_number() + 1,
                source,
            })?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        let entry = parser.parse_line(&line)?;

        if entry.kind == EntryKind::BansNone {
            debug!(line = %entry.line, "parsed ban list line");
        }

        entries.push(entry);
    }

    Ok(entries)
}

/// Open and parse a log file
pub fn parse_log_file(path: &Path, line_limit: usize, tz: Tz) -> Result<Vec<LogEntry>> {
    let file =
        File::open(path).with_context(|| format!("Unable to open file: {}", path.display()))?;

    info!(path = %path.display(), "parsing log");
    let entries = parse_log(BufReader::with_capacity(65536, file), line_limit, tz)
        .with_context(|| format!("Unable to parse log: {}", path.display()))?;
    info!(entries = entries.len(), "parsed log");

    Ok(entries)
}

/// Count entries per kind
pub fn summarize(entries: &[LogEntry]) -> EntrySummary {
    let mut counts: BTreeMap<EntryKind, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.kind).or_insert(0) += 1;
    }

    EntrySummary {
        total: entries.len(),
        by_kind: counts.into_iter().collect(),
        first_time: entries.iter().find_map(|e| e.time),
        last_time: entries.iter().rev().find_map(|e| e.time),
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use chrono_tz::America::Vancouver;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parser() -> LogParser {
        LogParser::with_date(Vancouver, date(2016, 3, 27))
    }

    fn parse(line: &str) -> LogEntry {
        parser().parse_line(line).unwrap()
    }

    #[test]
    fn test_invalid_line() {
        let err = parser().parse_line("test").unwrap_err();
        assert!(matches!(err, ParseError::Unrecognized { line_number: 1, .. }));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_log_open() {
        let mut parser = LogParser::new(Vancouver);
        let entry = parser
            .parse_line("--- Log opened Sun Mar 27 15:04:05 2016")
            .unwrap();

        assert_eq!(entry.kind, EntryKind::LogOpen);
        let time = entry.time.unwrap();
        assert_eq!(time.naive_local(), date(2016, 3, 27).and_hms_opt(15, 4, 5).unwrap());
        assert_eq!(parser.current_date(), Some(date(2016, 3, 27)));
    }

    #[test]
    fn test_join() {
        let entry = parse("15:04 -!- nick [user@host] has joined #channel");

        assert_eq!(entry.kind, EntryKind::Join);
        assert_eq!(entry.nick.as_deref(), Some("nick"));
        assert_eq!(entry.user_host.as_deref(), Some("user@host"));
        assert_eq!(entry.channel.as_deref(), Some("#channel"));

        let time = entry.time.unwrap();
        assert_eq!((time.hour(), time.minute(), time.second()), (15, 4, 0));
        assert_eq!(time.date_naive(), date(2016, 3, 27));
    }

    #[test]
    fn test_channel_summary() {
        let entry = parse(
            "15:04 -!- Irssi: #channel: Total of 5 nicks [4 ops, 0 halfops, 0 voices, 1 normal]",
        );
        assert_eq!(entry.kind, EntryKind::ChannelSummary);
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
    }

    #[test]
    fn test_mode() {
        let entry = parse("15:04 -!- mode/#channel [+o nick1] by nick2");
        assert_eq!(entry.kind, EntryKind::Mode);
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
        assert_eq!(entry.nick.as_deref(), Some("nick2"));
    }

    #[test]
    fn test_join_sync() {
        let entry = parse("15:04 -!- Irssi: Join to #channel was synced in 1 secs");
        assert_eq!(entry.kind, EntryKind::JoinSync);
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
    }

    #[test]
    fn test_message() {
        let entry = parse("15:04 <@nick> hello there");
        assert_eq!(entry.kind, EntryKind::Message);
        assert_eq!(entry.nick.as_deref(), Some("nick"));
        assert_eq!(entry.text.as_deref(), Some("hello there"));

        // Leading space survives so bot lines can be told apart
        let entry = parse("15:04 < relay>  <someone> relayed");
        assert_eq!(entry.nick.as_deref(), Some("relay"));
        assert_eq!(entry.text.as_deref(), Some(" <someone> relayed"));

        let entry = parse("15:04 <+nick> ");
        assert_eq!(entry.text.as_deref(), Some(""));
    }

    #[test]
    fn test_quit() {
        let entry = parse("15:04 -!- nick [~user@host] has quit [Ping timeout: 240 seconds]");
        assert_eq!(entry.kind, EntryKind::Quit);
        assert_eq!(entry.nick.as_deref(), Some("nick"));
        assert_eq!(entry.user_host.as_deref(), Some("~user@host"));
        assert_eq!(entry.text.as_deref(), Some("Ping timeout: 240 seconds"));
    }

    #[test]
    fn test_nick_change() {
        let entry = parse("15:04 -!- old is now known as new");
        assert_eq!(entry.kind, EntryKind::NickChange);
        assert_eq!(entry.nick.as_deref(), Some("old"));
        assert_eq!(entry.text.as_deref(), Some("new"));
    }

    #[test]
    fn test_day_change_moves_date() {
        let mut parser = parser();
        let entry = parser.parse_line("--- Day changed Mon Mar 28 2016").unwrap();

        assert_eq!(entry.kind, EntryKind::DayChange);
        assert_eq!(parser.current_date(), Some(date(2016, 3, 28)));

        let entry = parser.parse_line("00:01 <@nick> after midnight").unwrap();
        let time = entry.time.unwrap();
        assert_eq!(time.day(), 28);
        assert_eq!(time.minute(), 1);
        assert_eq!(parser.line_number(), 2);
    }

    #[test]
    fn test_log_closed() {
        let entry = parse("--- Log closed Sun Mar 27 23:59:01 2016");
        assert_eq!(entry.kind, EntryKind::LogClosed);
        assert_eq!(entry.time.unwrap().second(), 1);
    }

    #[test]
    fn test_now_talking() {
        let entry = parse("15:04 -!- Irssi: You are now talking in #channel");
        assert_eq!(entry.kind, EntryKind::NowTalking);
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
    }

    #[test]
    fn test_emote() {
        let entry = parse("15:04  * nick waves hello");
        assert_eq!(entry.kind, EntryKind::Emote);
        assert_eq!(entry.nick.as_deref(), Some("nick"));
        assert_eq!(entry.text.as_deref(), Some("waves hello"));
    }

    #[test]
    fn test_topic() {
        let entry = parse("15:04 -!- nick changed the topic of #channel to: new topic here");
        assert_eq!(entry.kind, EntryKind::Topic);
        assert_eq!(entry.nick.as_deref(), Some("nick"));
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
        assert_eq!(entry.text.as_deref(), Some("new topic here"));
    }

    #[test]
    fn test_kick() {
        let entry = parse("15:04 -!- victim was kicked from #channel by op [behave]");
        assert_eq!(entry.kind, EntryKind::Kick);
        assert_eq!(entry.nick.as_deref(), Some("victim"));
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
        assert_eq!(entry.text.as_deref(), Some("behave"));
    }

    #[test]
    fn test_part() {
        let entry = parse("15:04 -!- nick [user@host] has left #channel [later]");
        assert_eq!(entry.kind, EntryKind::Part);
        assert_eq!(entry.user_host.as_deref(), Some("user@host"));
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
        assert_eq!(entry.text.as_deref(), Some("later"));
    }

    #[test]
    fn test_your_nick_change() {
        let entry = parse("15:04 -!- You're now known as me_");
        assert_eq!(entry.kind, EntryKind::YourNickChange);
        assert_eq!(entry.nick.as_deref(), Some("me_"));
    }

    #[test]
    fn test_server_mode() {
        let entry = parse("15:04 -!- ServerMode/#channel [+nt] by irc.example.net");
        assert_eq!(entry.kind, EntryKind::ServerMode);
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
        assert_eq!(entry.text.as_deref(), Some("+nt"));
        assert_eq!(entry.nick.as_deref(), Some("irc.example.net"));
    }

    #[test]
    fn test_channel_notice() {
        let entry = parse("15:04 -nick:@#channel- attention please");
        assert_eq!(entry.kind, EntryKind::ChannelNotice);
        assert_eq!(entry.nick.as_deref(), Some("nick"));
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
        assert_eq!(entry.text.as_deref(), Some("attention please"));
    }

    #[test]
    fn test_keepnick_ignored() {
        let entry = parse("15:04 -!- Keepnick: Nickname me in use");
        assert_eq!(entry.kind, EntryKind::Ignored);
        assert!(entry.time.is_none());
    }

    #[test]
    fn test_server_notice() {
        let entry = parse("15:04 !irc.example.net *** Notice text");
        assert_eq!(entry.kind, EntryKind::ServerNotice);
        assert_eq!(entry.nick.as_deref(), Some("irc.example.net"));
        assert_eq!(entry.text.as_deref(), Some("*** Notice text"));
    }

    #[test]
    fn test_bans_none() {
        let entry = parse("15:04 -!- Irssi: No bans in channel #channel");
        assert_eq!(entry.kind, EntryKind::BansNone);
        assert_eq!(entry.channel.as_deref(), Some("#channel"));
    }

    #[test]
    fn test_clock_without_date() {
        let mut parser = LogParser::new(Vancouver);
        let entry = parser.parse_line("15:04 <@nick> early").unwrap();
        assert!(entry.time.is_none());
    }

    #[test]
    fn test_clock_in_dst_gap_moves_forward() {
        let mut parser = LogParser::with_date(Vancouver, date(2016, 3, 13));
        let entry = parser.parse_line("02:30 <@nick> lost hour").unwrap();
        let time = entry.time.unwrap();
        assert_eq!((time.hour(), time.minute()), (3, 30));
    }

    #[test]
    fn test_invalid_clock() {
        let err = parser().parse_line("25:99 <@nick> bad clock").unwrap_err();
        assert!(matches!(err, ParseError::Clock { .. }));
    }

    #[test]
    fn test_bad_header_timestamp() {
        let err = parser()
            .parse_line("--- Log opened sometime last week")
            .unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { .. }));
    }

    #[test]
    fn test_parse_log_line_limit() {
        let log = "--- Log opened Sun Mar 27 15:04:05 2016\r\n\
                   15:04 <@a> one\n\
                   15:05 <@b> two\n\
                   this line is never reached\n";

        let entries = parse_log(log.as_bytes(), 3, Vancouver).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].line, "--- Log opened Sun Mar 27 15:04:05 2016");

        let err = parse_log(log.as_bytes(), 0, Vancouver).unwrap_err();
        assert!(matches!(err, ParseError::Unrecognized { line_number: 4, .. }));
    }

    #[test]
    fn test_parse_log_lossy_utf8() {
        let log = b"--- Log opened Sun Mar 27 15:04:05 2016\n15:04 <@a> caf\xe9\n";
        let entries = parse_log(&log[..], 0, Vancouver).unwrap();
        assert_eq!(entries[1].text.as_deref(), Some("caf\u{fffd}"));
    }

    #[test]
    fn test_summarize() {
        let log = "--- Log opened Sun Mar 27 15:04:05 2016\n\
                   15:04 <@a> one\n\
                   15:05 <@b> two\n\
                   15:06 -!- b [b@host] has quit [bye]\n";
        let entries = parse_log(log.as_bytes(), 0, Vancouver).unwrap();
        let summary = summarize(&entries);

        assert_eq!(summary.total, 4);
        assert_eq!(
            summary.by_kind,
            vec![
                (EntryKind::LogOpen, 1),
                (EntryKind::Message, 2),
                (EntryKind::Quit, 1),
            ]
        );
        assert_eq!(summary.last_time.unwrap().minute(), 6);
    }
}
