//! Case-insensitive substring search with query highlighting.
//!
//! # Responsibility
//! - Match a normalized query against title + abstract of every document.
//! - Compute per-hit snippets and a highlighted title rendering.
//!
//! # Invariants
//! - An empty (or whitespace-only) query matches every document.
//! - Hits keep the collection's insertion order; there is no scoring.
//! - Query text is always treated as a literal, never as regex syntax.

use crate::model::document::Document;
use crate::xml::fields::extract_fields;
use regex::Regex;
use serde::Serialize;

/// Highlight markers wrapped around each query match in the display title.
const HIGHLIGHT_OPEN: &str = "<mark>";
const HIGHLIGHT_CLOSE: &str = "</mark>";

/// Snippet length in characters, before the ellipsis suffix.
const SNIPPET_CHARS: usize = 150;

/// One search hit, shaped for direct rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Store key of the matching document (used to open its dashboard).
    pub stored_title: String,
    /// Extracted article title, or its default.
    pub display_title: String,
    /// Display title with every query match wrapped in highlight markers.
    /// Equals `display_title` for the empty query.
    pub highlighted_title: String,
    /// Extracted PMID, or `N/A`.
    pub pmid: String,
    /// First 150 chars of the abstract plus a literal `...` suffix.
    pub snippet: String,
}

/// Searches a snapshot of the collection.
///
/// Stateless: the caller passes the current document list and keeps
/// ownership of it. Matching is case-insensitive substring containment over
/// `title + " " + abstract`; an empty collection yields an empty result.
pub fn search(documents: &[Document], query: &str) -> Vec<SearchHit> {
    let normalized = query.trim().to_lowercase();
    let highlighter = build_highlighter(&normalized);
    let mut hits = Vec::new();

    for document in documents {
        let fields = extract_fields(&document.raw_xml);
        let display_title = fields.display_title().to_string();
        let abstract_text = fields.abstract_for_search();

        let haystack = format!("{display_title} {abstract_text}").to_lowercase();
        if !normalized.is_empty() && !haystack.contains(&normalized) {
            continue;
        }

        hits.push(SearchHit {
            stored_title: document.title.clone(),
            highlighted_title: highlight(&display_title, highlighter.as_ref()),
            display_title,
            pmid: fields.pmid_display().to_string(),
            snippet: snippet_of(abstract_text),
        });
    }

    hits
}

/// Builds the case-insensitive literal matcher for a non-empty query.
///
/// The query is regex-escaped first, so metacharacters like `a.b*` match
/// only their literal spelling. Compilation of an escaped literal can only
/// fail on pathological pattern sizes; in that case highlighting is skipped
/// rather than surfaced as an error.
fn build_highlighter(normalized_query: &str) -> Option<Regex> {
    if normalized_query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(normalized_query))).ok()
}

/// Wraps every match in highlight markers, echoing back the matched text so
/// the source casing survives.
fn highlight(display_title: &str, highlighter: Option<&Regex>) -> String {
    let Some(re) = highlighter else {
        return display_title.to_string();
    };
    re.replace_all(display_title, |caps: &regex::Captures<'_>| {
        format!("{HIGHLIGHT_OPEN}{}{HIGHLIGHT_CLOSE}", &caps[0])
    })
    .into_owned()
}

/// First 150 chars of the abstract plus the literal ellipsis, also when the
/// abstract is shorter than the window.
fn snippet_of(abstract_text: &str) -> String {
    let mut snippet: String = abstract_text.chars().take(SNIPPET_CHARS).collect();
    snippet.push_str("...");
    snippet
}

#[cfg(test)]
mod tests {
    use super::{build_highlighter, highlight, snippet_of};

    #[test]
    fn snippet_keeps_short_abstract_whole() {
        assert_eq!(snippet_of("short text"), "short text...");
    }

    #[test]
    fn snippet_cuts_on_chars_not_bytes() {
        let abstract_text = "é".repeat(200);
        let snippet = snippet_of(&abstract_text);
        assert_eq!(snippet.chars().count(), 153);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn highlighter_echoes_source_casing() {
        let re = build_highlighter("gene").expect("literal query compiles");
        assert_eq!(
            highlight("Gene therapy", Some(&re)),
            "<mark>Gene</mark> therapy"
        );
    }
}
