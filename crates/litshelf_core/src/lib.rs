//! Core domain logic for the litshelf literature manager.
//! This crate is the single source of truth for store, search and dashboard
//! invariants; presentation layers only call into it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod stats;
pub mod xml;

pub use db::{open_db, open_db_in_memory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, DocumentValidationError};
pub use repo::document_repo::{
    DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository,
};
pub use repo::signal_repo::{ImportSignalRepository, SqliteImportSignalRepository};
pub use search::engine::{search, SearchHit};
pub use service::import_service::{ImportError, ImportOutcome, ImportService};
pub use service::library_service::{DocumentDashboard, LibraryService};
pub use stats::text_stats::{analyze, TextStats};
pub use xml::fields::{extract_fields, ArticleFields};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
