//! Plain-text helpers shared by the signal extractors. Pure, no I/O.

/// Collapse consecutive whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count non-empty whitespace-separated tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn counts_non_empty_tokens() {
        assert_eq!(count_words("one two  three"), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn count_is_invariant_under_collapsing() {
        for s in ["a  b   c", "\t\nx y\t", "", "single", "  padded  words  here  "] {
            assert_eq!(count_words(s), count_words(&collapse_whitespace(s)));
        }
    }
}
