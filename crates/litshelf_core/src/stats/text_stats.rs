//! Six independent text metrics over one input string.
//!
//! # Responsibility
//! - Compute the dashboard counters (words, chars, sentences, non-ASCII).
//!
//! # Invariants
//! - Every metric is derived from the input directly, never from another
//!   metric.
//! - Empty or whitespace-only input yields zero words, not one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SENTENCE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence break regex"));
// A word counts once however many non-ASCII runs it contains.
static NON_ASCII_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w*[^\x00-\x7F]+\w*\b").expect("valid non-ascii word regex"));

/// Counters rendered on the article dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    /// Whitespace-separated non-empty tokens.
    pub word_count: usize,
    /// All chars, whitespace included.
    pub char_count_with_spaces: usize,
    /// All chars except whitespace.
    pub char_count_no_spaces: usize,
    /// Segments between runs of `.`, `!`, `?` that are non-empty after trim.
    pub sentence_count: usize,
    /// Chars outside the 7-bit ASCII range.
    pub non_ascii_char_count: usize,
    /// Word tokens containing at least one non-ASCII char.
    pub non_ascii_word_count: usize,
}

/// Computes all six dashboard metrics for one text.
pub fn analyze(text: &str) -> TextStats {
    TextStats {
        word_count: text.split_whitespace().count(),
        char_count_with_spaces: text.chars().count(),
        char_count_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        sentence_count: SENTENCE_BREAK_RE
            .split(text)
            .filter(|segment| !segment.trim().is_empty())
            .count(),
        non_ascii_char_count: text.chars().filter(|c| !c.is_ascii()).count(),
        non_ascii_word_count: NON_ASCII_WORD_RE.find_iter(text).count(),
    }
}
