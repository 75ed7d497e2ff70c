//! Article field extraction with per-context fallback defaults.
//!
//! # Responsibility
//! - Locate the well-known elements of a PubMed record by fixed structural
//!   paths: first `ArticleTitle`, first `AbstractText`, first `PMID`, and
//!   the first `Year` nested under `DateCompleted`.
//! - Return defaults for anything absent; never propagate a parse error.
//!
//! # Invariants
//! - Fields are recomputed from the raw XML on every call, never cached.
//! - A reader error ends extraction early and keeps whatever was already
//!   collected.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

/// Fallback when a record has no usable `ArticleTitle`.
pub const NO_TITLE: &str = "No Title";
/// Fallback shown on the dashboard when a record has no abstract.
pub const NO_ABSTRACT: &str = "No abstract available.";
/// Fallback for missing PMID and completion year.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fields derived from one stored record.
///
/// `None` means the element was absent, empty, or lost to a parse failure;
/// the accessor methods apply the display defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleFields {
    pub article_title: Option<String>,
    pub abstract_text: Option<String>,
    pub pmid: Option<String>,
    pub completed_year: Option<String>,
}

impl ArticleFields {
    /// Article title, or `No Title`.
    pub fn display_title(&self) -> &str {
        self.article_title.as_deref().unwrap_or(NO_TITLE)
    }

    /// Abstract used for matching; missing abstracts match as empty text.
    pub fn abstract_for_search(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }

    /// Abstract as shown on the dashboard.
    pub fn abstract_for_display(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or(NO_ABSTRACT)
    }

    /// PMID, or `N/A`.
    pub fn pmid_display(&self) -> &str {
        self.pmid.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Completion year, or `N/A`.
    pub fn year_display(&self) -> &str {
        self.completed_year.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    ArticleTitle,
    AbstractText,
    Pmid,
    CompletedYear,
}

/// Extracts the well-known article fields from raw XML text.
///
/// Each field takes the first matching element in document order. Text
/// content concatenates descendant text and CDATA nodes; surrounding
/// whitespace is trimmed and empty content counts as absent.
pub fn extract_fields(raw_xml: &str) -> ArticleFields {
    let mut fields = ArticleFields::default();

    let mut reader = Reader::from_str(raw_xml);
    let mut stack: Vec<String> = Vec::new();
    // (target, depth at which capture started, accumulated text)
    let mut capture: Option<(Target, usize, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
                stack.push(name);
                if capture.is_none() {
                    if let Some(target) = next_target(&stack, &fields) {
                        capture = Some((target, stack.len(), String::new()));
                    }
                }
            }
            Ok(Event::Text(text)) => {
                if let Some((_, _, buf)) = capture.as_mut() {
                    buf.push_str(&text.unescape().unwrap_or_default());
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some((_, _, buf)) = capture.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if let Some((target, depth, buf)) = capture.as_ref() {
                    if stack.len() == *depth {
                        commit(&mut fields, *target, buf);
                        capture = None;
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            // Malformed input: keep what was collected, default the rest.
            Err(_) => break,
            Ok(_) => {}
        }

        if fields.article_title.is_some()
            && fields.abstract_text.is_some()
            && fields.pmid.is_some()
            && fields.completed_year.is_some()
        {
            break;
        }
    }

    fields
}

fn next_target(stack: &[String], fields: &ArticleFields) -> Option<Target> {
    let innermost = stack.last().map(String::as_str)?;
    match innermost {
        "ArticleTitle" if fields.article_title.is_none() => Some(Target::ArticleTitle),
        "AbstractText" if fields.abstract_text.is_none() => Some(Target::AbstractText),
        "PMID" if fields.pmid.is_none() => Some(Target::Pmid),
        "Year"
            if fields.completed_year.is_none()
                && stack.iter().any(|name| name == "DateCompleted") =>
        {
            Some(Target::CompletedYear)
        }
        _ => None,
    }
}

fn commit(fields: &mut ArticleFields, target: Target, buf: &str) {
    let value = buf.trim();
    if value.is_empty() {
        return;
    }
    let slot = match target {
        Target::ArticleTitle => &mut fields.article_title,
        Target::AbstractText => &mut fields.abstract_text,
        Target::Pmid => &mut fields.pmid,
        Target::CompletedYear => &mut fields.completed_year,
    };
    *slot = Some(value.to_string());
}

#[cfg(test)]
mod tests {
    use super::{extract_fields, NO_TITLE};

    const FULL_RECORD: &str = r#"
        <PubmedArticle>
            <MedlineCitation>
                <PMID Version="1">31452104</PMID>
                <DateCompleted>
                    <Year>2020</Year>
                    <Month>03</Month>
                </DateCompleted>
                <Article>
                    <ArticleTitle>Gene expression in tumor samples</ArticleTitle>
                    <Abstract>
                        <AbstractText>We measured expression levels.</AbstractText>
                    </Abstract>
                </Article>
            </MedlineCitation>
        </PubmedArticle>"#;

    #[test]
    fn extracts_all_four_fields() {
        let fields = extract_fields(FULL_RECORD);
        assert_eq!(
            fields.article_title.as_deref(),
            Some("Gene expression in tumor samples")
        );
        assert_eq!(
            fields.abstract_text.as_deref(),
            Some("We measured expression levels.")
        );
        assert_eq!(fields.pmid.as_deref(), Some("31452104"));
        assert_eq!(fields.completed_year.as_deref(), Some("2020"));
    }

    #[test]
    fn missing_title_defaults_to_no_title() {
        let fields = extract_fields("<PubmedArticle><PMID>1</PMID></PubmedArticle>");
        assert_eq!(fields.article_title, None);
        assert_eq!(fields.display_title(), NO_TITLE);
    }

    #[test]
    fn malformed_xml_degrades_to_defaults() {
        let fields = extract_fields("<PubmedArticle><ArticleTitle>Broken");
        assert_eq!(fields.display_title(), NO_TITLE);
        assert_eq!(fields.pmid_display(), "N/A");
    }

    #[test]
    fn fields_collected_before_a_parse_error_are_kept() {
        let fields =
            extract_fields("<A><PMID>42</PMID><ArticleTitle>Ok</ArticleTitle><<<");
        assert_eq!(fields.pmid.as_deref(), Some("42"));
        assert_eq!(fields.article_title.as_deref(), Some("Ok"));
    }

    #[test]
    fn year_outside_date_completed_is_ignored() {
        let fields = extract_fields(
            "<PubmedArticle><PubDate><Year>1999</Year></PubDate></PubmedArticle>",
        );
        assert_eq!(fields.completed_year, None);
        assert_eq!(fields.year_display(), "N/A");
    }

    #[test]
    fn first_pmid_in_document_order_wins() {
        let fields = extract_fields(
            "<A><PMID>111</PMID><CommentsCorrections><PMID>222</PMID></CommentsCorrections></A>",
        );
        assert_eq!(fields.pmid.as_deref(), Some("111"));
    }

    #[test]
    fn nested_markup_inside_title_is_flattened() {
        let fields =
            extract_fields("<A><ArticleTitle>Role of <i>BRCA1</i> variants</ArticleTitle></A>");
        assert_eq!(
            fields.article_title.as_deref(),
            Some("Role of BRCA1 variants")
        );
    }

    #[test]
    fn entities_are_unescaped() {
        let fields = extract_fields("<A><ArticleTitle>Salt &amp; water</ArticleTitle></A>");
        assert_eq!(fields.article_title.as_deref(), Some("Salt & water"));
    }

    #[test]
    fn empty_elements_count_as_absent() {
        let fields = extract_fields("<A><ArticleTitle>   </ArticleTitle></A>");
        assert_eq!(fields.article_title, None);
        assert_eq!(fields.display_title(), NO_TITLE);
    }
}
