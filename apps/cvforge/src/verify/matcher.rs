//! Field presence tests. Both arguments are expected to be normalized already.
//!
//! Every test is binary: no scoring, no partial credit.

use crate::verify::fields::{Field, MatchRule};

/// Contiguous substring test.
pub fn contains_exact(rendered: &str, expected: &str) -> bool {
    rendered.contains(expected)
}

/// Leading `chars` characters of `text` (char-boundary safe).
pub fn leading_chars(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Only the first `chars` characters of `expected` must appear.
/// Tolerates line wrapping differences later in long sentences.
pub fn contains_prefix(rendered: &str, expected: &str, chars: usize) -> bool {
    rendered.contains(leading_chars(expected, chars))
}

/// Exact substring, else every significant word present anywhere.
///
/// Multi-column layouts can split or reorder a title during text extraction.
/// Words of `min_word_len` characters or fewer ("and", "of", "&") are ignored
/// by the fallback. A title made only of short words falls back to a vacuous
/// match.
pub fn matches_title(rendered: &str, expected: &str, min_word_len: usize) -> bool {
    if contains_exact(rendered, expected) {
        return true;
    }
    expected
        .split_whitespace()
        .filter(|word| word.chars().count() > min_word_len)
        .all(|word| rendered.contains(word))
}

/// Applies the field's rule against normalized rendered text.
pub fn is_present(rendered: &str, field: &Field, title_word_min_len: usize) -> bool {
    match field.rule {
        MatchRule::Exact => contains_exact(rendered, &field.expected),
        MatchRule::Title => matches_title(rendered, &field.expected, title_word_min_len),
        MatchRule::Prefix(chars) => contains_prefix(rendered, &field.expected, chars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::normalize::normalize;

    #[test]
    fn test_exact_match_is_substring() {
        let rendered = normalize("Contact: A@B.COM | London");
        assert!(contains_exact(&rendered, &normalize("a@b.com")));
        assert!(!contains_exact(&rendered, &normalize("a@c.com")));
    }

    #[test]
    fn test_leading_chars_respects_char_boundaries() {
        assert_eq!(leading_chars("héllo wörld", 4), "héll");
        assert_eq!(leading_chars("short", 30), "short");
        assert_eq!(leading_chars("", 20), "");
    }

    #[test]
    fn test_prefix_tolerates_different_tail() {
        let rendered = normalize(
            "Designed an offline calibration workflow that cut setup time (see notes)",
        );
        let expected =
            normalize("Designed an offline calibration workflow that cut instrument setup time by 40%");
        assert!(!contains_exact(&rendered, &expected));
        assert!(contains_prefix(&rendered, &expected, 30));
    }

    #[test]
    fn test_title_fallback_accepts_reordered_words() {
        let rendered = normalize("Analysis of Scattering Data for industry");
        assert!(matches_title(&rendered, &normalize("Scattering Data Analysis"), 3));
    }

    #[test]
    fn test_title_fallback_ignores_short_words() {
        let rendered = normalize("research & development");
        assert!(matches_title(&rendered, &normalize("R&D and Research Development"), 3));
    }

    #[test]
    fn test_hyphenated_word_is_one_token() {
        // "cross-functional" is a single significant word and is absent as a substring.
        let rendered = normalize("leadership across functional teams");
        assert!(!matches_title(&rendered, &normalize("Cross-Functional Leadership"), 3));
    }

    #[test]
    fn test_threshold_is_tunable() {
        let rendered = normalize("Grant Management");
        let expected = normalize("Grant Writing");
        assert!(!matches_title(&rendered, &expected, 3));
        // With a high threshold no word qualifies and the fallback is vacuous.
        assert!(matches_title(&rendered, &expected, 10));
    }
}
