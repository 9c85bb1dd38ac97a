/// Take `count` words from `text` after skipping the first `skip`
///
/// Words are delimited by single spaces; runs of spaces produce empty words,
/// which are dropped and not counted. The result joins the collected words
/// with single spaces. If the text runs out first the result is short (or
/// empty), never padded.
///
/// Scanning stops as soon as enough words are collected, so this is cheap
/// on an unbounded suffix.
pub fn k_words(text: &str, skip: usize, count: usize) -> String {
    let mut out = String::new();

    for word in text
        .split(' ')
        .filter(|w| !w.is_empty())
        .skip(skip)
        .take(count)
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    out
}

/// Number of non-empty space-delimited words
pub fn word_count(text: &str) -> usize {
    text.split(' ').filter(|w| !w.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_and_take() {
        assert_eq!(k_words("a b c d e", 2, 2), "c d");
        assert_eq!(k_words("a b c d e", 0, 1), "a");
        assert_eq!(k_words("a b c d e", 4, 3), "e");
    }

    #[test]
    fn test_short_result_not_padded() {
        assert_eq!(k_words("a b", 0, 3), "a b");
        assert_eq!(k_words("a b", 2, 2), "");
        assert_eq!(k_words("", 0, 2), "");
    }

    #[test]
    fn test_repeated_spaces_dropped() {
        assert_eq!(k_words("  a   b  c ", 1, 2), "b c");
        assert_eq!(word_count("  a   b  c "), 3);
    }

    #[test]
    fn test_only_spaces_split() {
        // Tabs and newlines are part of a word
        assert_eq!(k_words("a\tb c\nd e", 0, 2), "a\tb c\nd");
    }
}
