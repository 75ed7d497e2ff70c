//! Stored document model.
//!
//! # Responsibility
//! - Define the (title, raw XML) pair that represents one literature record.
//! - Provide write-boundary validation for the store key.
//!
//! # Invariants
//! - `title` is the unique store key and must not be blank.
//! - `raw_xml` is kept verbatim; display fields are always re-derived from
//!   it, never cached on the model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before any persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    /// Store keys must carry at least one non-whitespace character.
    BlankTitle,
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "document title must not be blank"),
        }
    }
}

impl Error for DocumentValidationError {}

/// One stored literature record.
///
/// The title doubles as the store key: file imports use the file's own name,
/// remote imports use `PMID: <id>`. Everything shown to a reader (article
/// title, abstract, year) is extracted from `raw_xml` on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique store key.
    pub title: String,
    /// Verbatim PubMed-style XML text.
    pub raw_xml: String,
}

impl Document {
    /// Creates a document from a store key and raw XML text.
    pub fn new(title: impl Into<String>, raw_xml: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            raw_xml: raw_xml.into(),
        }
    }

    /// Checks store-key invariants.
    ///
    /// Write paths must call this before any SQL mutation.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        if self.title.trim().is_empty() {
            return Err(DocumentValidationError::BlankTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentValidationError};

    #[test]
    fn blank_title_is_rejected() {
        let document = Document::new("   ", "<PubmedArticle/>");
        assert_eq!(
            document.validate(),
            Err(DocumentValidationError::BlankTitle)
        );
    }

    #[test]
    fn non_blank_title_passes_validation() {
        let document = Document::new("paper.xml", "<PubmedArticle/>");
        assert!(document.validate().is_ok());
    }
}
