#![no_main]

use argot::utils::{k_words, word_count};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, u8, u8)| {
    let (text, skip, count) = input;
    let phrase = k_words(text, skip as usize, count as usize);
    assert!(word_count(&phrase) <= count as usize);
});
