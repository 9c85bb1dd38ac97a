//! Types for parsed Irssi log lines

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

/// What a log line records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    LogOpen,
    Join,
    ChannelSummary,
    Mode,
    JoinSync,
    Message,
    Quit,
    NickChange,
    DayChange,
    LogClosed,
    NowTalking,
    Emote,
    Topic,
    Kick,
    Part,
    YourNickChange,
    ServerMode,
    ChannelNotice,
    /// Plugin chatter that carries nothing worth keeping
    Ignored,
    ServerNotice,
    BansNone,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::LogOpen => "log opened",
            EntryKind::Join => "join",
            EntryKind::ChannelSummary => "channel summary",
            EntryKind::Mode => "mode",
            EntryKind::JoinSync => "join sync",
            EntryKind::Message => "message",
            EntryKind::Quit => "quit",
            EntryKind::NickChange => "nick change",
            EntryKind::DayChange => "day changed",
            EntryKind::LogClosed => "log closed",
            EntryKind::NowTalking => "now talking",
            EntryKind::Emote => "emote",
            EntryKind::Topic => "topic",
            EntryKind::Kick => "kick",
            EntryKind::Part => "part",
            EntryKind::YourNickChange => "own nick change",
            EntryKind::ServerMode => "server mode",
            EntryKind::ChannelNotice => "channel notice",
            EntryKind::Ignored => "ignored",
            EntryKind::ServerNotice => "server notice",
            EntryKind::BansNone => "bans none",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// Raw line, without the line terminator
    pub line: String,
    /// When the line was logged. `None` for ignored lines and for clock
    /// lines seen before any log-open or day-change header.
    pub time: Option<DateTime<Tz>>,
    pub kind: EntryKind,
    pub channel: Option<String>,
    pub nick: Option<String>,
    /// user@host
    pub user_host: Option<String>,
    /// Message text, quit reason, new nick, topic, etc.
    pub text: Option<String>,
}

impl LogEntry {
    /// Entry of the given kind with no fields filled in
    pub fn new(kind: EntryKind, line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            time: None,
            kind,
            channel: None,
            nick: None,
            user_host: None,
            text: None,
        }
    }
}

/// Per-kind counts over a parsed log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntrySummary {
    pub total: usize,
    /// Counts in `EntryKind` order, kinds with no entries omitted
    pub by_kind: Vec<(EntryKind, usize)>,
    pub first_time: Option<DateTime<Tz>>,
    pub last_time: Option<DateTime<Tz>>,
}
