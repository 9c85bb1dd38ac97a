//! Line matchers
//!
//! Each Irssi line shape is a named matcher: a regex with named capture
//! groups plus the entry kind it produces. Matchers are tried in table
//! order and the first hit wins.
//!
//! Capture group names are shared by every pattern:
//! `hour`/`minute` for clock-prefixed lines, `stamp` for header timestamps,
//! and `channel`, `nick`, `user_host`, `text` for the entry fields.

use super::types::EntryKind;
use regex::{Captures, Regex, RegexSet};
use std::sync::LazyLock;

/// Where an entry's timestamp comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// `HH:MM` placed on the current date
    Clock,
    /// `--- Log opened/closed` full timestamp
    Header,
    /// `--- Day changed` date
    Date,
    /// No timestamp recorded
    None,
}

/// A named line shape
pub struct Matcher {
    pub name: &'static str,
    pub kind: EntryKind,
    pub time: TimeSource,
    regex: Regex,
}

impl Matcher {
    fn new(name: &'static str, kind: EntryKind, time: TimeSource, pattern: &str) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for matcher {name}: {e}"));
        Self {
            name,
            kind,
            time,
            regex,
        }
    }

    /// Try this matcher against a line
    pub fn captures<'l>(&self, line: &'l str) -> Option<Captures<'l>> {
        self.regex.captures(line)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

const CLOCK: &str = r"^(?P<hour>\d{2}):(?P<minute>\d{2})";

fn clock(rest: &str) -> String {
    format!("{CLOCK}{rest}")
}

/// Matcher table in priority order
pub static MATCHERS: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    use EntryKind as K;
    use TimeSource as T;

    vec![
        Matcher::new("log_open", K::LogOpen, T::Header, r"^--- Log opened (?P<stamp>.+)$"),
        Matcher::new(
            "join",
            K::Join,
            T::Clock,
            &clock(r" -!- (?P<nick>\S+) \[(?P<user_host>\S+?)\] has joined (?P<channel>\S+)$"),
        ),
        Matcher::new(
            "channel_summary",
            K::ChannelSummary,
            T::Clock,
            &clock(
                r" -!- Irssi: (?P<channel>\S+): Total of \d+ nicks \[\d+ ops, \d+ halfops, \d+ voices, \d+ normal\]$",
            ),
        ),
        Matcher::new(
            "mode",
            K::Mode,
            T::Clock,
            &clock(r" -!- mode/(?P<channel>\S+) \[.+\] by (?P<nick>\S+)$"),
        ),
        Matcher::new(
            "join_sync",
            K::JoinSync,
            T::Clock,
            &clock(r" -!- Irssi: Join to (?P<channel>\S+) was synced in \d+ secs$"),
        ),
        // The first character inside <> is the nick mode prefix (@, +, space)
        Matcher::new(
            "message",
            K::Message,
            T::Clock,
            &clock(r" <.(?P<nick>\S+)> (?P<text>.*)$"),
        ),
        Matcher::new(
            "quit",
            K::Quit,
            T::Clock,
            &clock(r" -!- (?P<nick>\S+) \[(?P<user_host>\S+)\] has quit \[(?P<text>.*)\]$"),
        ),
        Matcher::new(
            "nick_change",
            K::NickChange,
            T::Clock,
            &clock(r" -!- (?P<nick>\S+) is now known as (?P<text>\S+)$"),
        ),
        Matcher::new("day_change", K::DayChange, T::Date, r"^--- Day changed (?P<stamp>.+)$"),
        Matcher::new("log_closed", K::LogClosed, T::Header, r"^--- Log closed (?P<stamp>.+)$"),
        Matcher::new(
            "now_talking",
            K::NowTalking,
            T::Clock,
            &clock(r" -!- Irssi: You are now talking in (?P<channel>\S+)$"),
        ),
        Matcher::new(
            "emote",
            K::Emote,
            T::Clock,
            &clock(r"  \* (?P<nick>\S+) (?P<text>.*)$"),
        ),
        Matcher::new(
            "topic",
            K::Topic,
            T::Clock,
            &clock(r" -!- (?P<nick>\S+) changed the topic of (?P<channel>\S+) to: (?P<text>.*)$"),
        ),
        Matcher::new(
            "kick",
            K::Kick,
            T::Clock,
            &clock(r" -!- (?P<nick>\S+) was kicked from (?P<channel>\S+) by \S+ \[(?P<text>.*)\]$"),
        ),
        Matcher::new(
            "part",
            K::Part,
            T::Clock,
            &clock(
                r" -!- (?P<nick>\S+) \[(?P<user_host>\S+)\] has left (?P<channel>\S+) \[(?P<text>.*)\]$",
            ),
        ),
        Matcher::new(
            "your_nick_change",
            K::YourNickChange,
            T::Clock,
            &clock(r" -!- You're now known as (?P<nick>\S+)$"),
        ),
        Matcher::new(
            "server_mode",
            K::ServerMode,
            T::Clock,
            &clock(r" -!- ServerMode/(?P<channel>\S+) \[(?P<text>.+)\] by (?P<nick>\S+)$"),
        ),
        Matcher::new(
            "channel_notice",
            K::ChannelNotice,
            T::Clock,
            &clock(r" -(?P<nick>\S+):[+@]?(?P<channel>\S+)- (?P<text>.*)$"),
        ),
        Matcher::new("keepnick", K::Ignored, T::None, &clock(r" -!- Keepnick:")),
        Matcher::new(
            "server_notice",
            K::ServerNotice,
            T::Clock,
            &clock(r" !(?P<nick>\S+) (?P<text>.*)$"),
        ),
        Matcher::new(
            "bans_none",
            K::BansNone,
            T::Clock,
            &clock(r" -!- Irssi: No bans in channel (?P<channel>\S+)$"),
        ),
    ]
});

static MATCHER_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(MATCHERS.iter().map(Matcher::pattern))
        .unwrap_or_else(|e| panic!("invalid matcher table: {e}"))
});

/// Find the highest-priority matcher for a line
///
/// All patterns are checked in one pass; the lowest table index among the
/// hits decides.
pub fn find_matcher(line: &str) -> Option<&'static Matcher> {
    MATCHER_SET
        .matches(line)
        .iter()
        .next()
        .map(|idx| &MATCHERS[idx])
}
