//! Text normalization applied to BOTH rendered document text and source field
//! text before any comparison.
//!
//! Typesetting substitutes ligature glyphs (ﬁ, ﬂ, ﬀ, ﬃ, ﬄ), inserts soft
//! hyphens at optional breaks, curls quotes, and reflows whitespace. After
//! normalization those differences disappear. The function is total and
//! idempotent.

/// Normalizes text for substring comparison.
///
/// Rules, in order:
/// 1. expand ligature code points U+FB00–U+FB04
/// 2. strip soft hyphens (U+00AD)
/// 3. curly single/double quotes → ASCII `'` / `"`
/// 4. lowercase
/// 5. collapse whitespace runs to one space, trim
pub fn normalize(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{FB00}' => expanded.push_str("ff"),
            '\u{FB01}' => expanded.push_str("fi"),
            '\u{FB02}' => expanded.push_str("fl"),
            '\u{FB03}' => expanded.push_str("ffi"),
            '\u{FB04}' => expanded.push_str("ffl"),
            '\u{00AD}' => {}
            '\u{2018}' | '\u{2019}' => expanded.push('\''),
            '\u{201C}' | '\u{201D}' => expanded.push('"'),
            other => expanded.push(other),
        }
    }

    expanded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
