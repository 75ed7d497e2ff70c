//! Library read-side facade: load, search, dashboard.
//!
//! # Responsibility
//! - Hand search a fresh snapshot of the stored collection.
//! - Assemble the per-article dashboard (defaulted fields + text stats).
//!
//! # Invariants
//! - Unavailable or corrupt storage degrades to an empty library at load
//!   time; it never fails the caller.
//! - Dashboard statistics are computed on the displayed abstract text,
//!   placeholder included.

use crate::model::document::Document;
use crate::repo::document_repo::{DocumentRepository, RepoResult};
use crate::search::engine::{search, SearchHit};
use crate::stats::text_stats::{analyze, TextStats};
use crate::xml::fields::extract_fields;
use log::{info, warn};
use serde::Serialize;

/// Everything the dashboard panel renders for one selected document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDashboard {
    pub display_title: String,
    pub pmid: String,
    pub completed_year: String,
    pub abstract_text: String,
    pub stats: TextStats,
}

/// Read-side service over the document store.
pub struct LibraryService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> LibraryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the full collection, treating storage failures as an empty
    /// library.
    pub fn load_library(&self) -> Vec<Document> {
        match self.repo.list_documents() {
            Ok(documents) => {
                info!(
                    "event=library_load module=service status=ok documents={}",
                    documents.len()
                );
                documents
            }
            Err(err) => {
                warn!(
                    "event=library_load module=service status=degraded documents=0 error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Runs a free-text search over the current library snapshot.
    ///
    /// An empty query lists the whole library in insertion order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let documents = self.load_library();
        search(&documents, query)
    }

    /// Builds the dashboard for one stored document, or `None` for an
    /// unknown store key.
    pub fn dashboard(&self, stored_title: &str) -> RepoResult<Option<DocumentDashboard>> {
        let Some(document) = self.repo.get_document(stored_title)? else {
            return Ok(None);
        };

        let fields = extract_fields(&document.raw_xml);
        let abstract_text = fields.abstract_for_display().to_string();
        let stats = analyze(&abstract_text);

        Ok(Some(DocumentDashboard {
            display_title: fields.display_title().to_string(),
            pmid: fields.pmid_display().to_string(),
            completed_year: fields.year_display().to_string(),
            abstract_text,
            stats,
        }))
    }
}
