#![no_main]

use argot::irssi::LogParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary lines must parse or error, never panic
    let mut parser = LogParser::new(chrono_tz::America::Vancouver);
    for line in data.lines() {
        let _ = parser.parse_line(line);
    }
});
