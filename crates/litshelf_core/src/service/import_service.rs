//! Import bridge: local files and cross-context payloads into the store.
//!
//! # Responsibility
//! - Derive store keys (file name, `PMID: <id>`) and append documents.
//! - Consume the one-shot import signal slot.
//!
//! # Invariants
//! - A duplicate title is a user-facing rejection, never a crash, and
//!   leaves the store unchanged.
//! - The signal slot is cleared once consumed, also when the payload turns
//!   out to be a duplicate.

use crate::model::document::Document;
use crate::repo::document_repo::{DocumentRepository, RepoError};
use crate::repo::signal_repo::ImportSignalRepository;
use crate::xml::fields::extract_fields;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Store-key prefix for documents imported through the remote channel.
const REMOTE_TITLE_PREFIX: &str = "PMID: ";

/// Result of one import attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Document appended and persisted under `title`.
    Imported { title: String },
    /// A document with this title already exists; nothing changed.
    Duplicate { title: String },
}

impl ImportOutcome {
    /// Store key the outcome refers to.
    pub fn title(&self) -> &str {
        match self {
            Self::Imported { title } | Self::Duplicate { title } => title,
        }
    }
}

/// Import-bridge error for file access and persistence failures.
#[derive(Debug)]
pub enum ImportError {
    /// The file path carries no usable file name to derive a title from.
    InvalidFileName(String),
    /// Reading the file failed.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Persistence-layer failure other than a duplicate title.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFileName(path) => {
                write!(f, "cannot derive a document title from path `{path}`")
            }
            Self::Io { path, source } => write!(f, "failed to read `{path}`: {source}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFileName(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Import bridge over the document store and the cross-context signal slot.
pub struct ImportService<D: DocumentRepository, S: ImportSignalRepository> {
    documents: D,
    signals: S,
}

impl<D: DocumentRepository, S: ImportSignalRepository> ImportService<D, S> {
    /// Creates a service using the provided repository implementations.
    pub fn new(documents: D, signals: S) -> Self {
        Self { documents, signals }
    }

    /// Imports a local XML file, deriving the store key from its file name.
    ///
    /// The caller is expected to refresh its library view on
    /// `ImportOutcome::Imported` and to surface `Duplicate` to the user.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportOutcome, ImportError> {
        let path = path.as_ref();
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ImportError::InvalidFileName(path.display().to_string()))?;

        let raw_xml = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.display().to_string(),
            source,
        })?;

        self.add_as(title, raw_xml, "file")
    }

    /// Imports one raw XML payload received from the remote-search
    /// collaborator.
    ///
    /// The store key is `PMID: <id>`, with the id taken from the payload's
    /// first `PMID` element or synthesized from the current timestamp when
    /// absent.
    pub fn import_remote_xml(&self, raw_xml: impl Into<String>) -> Result<ImportOutcome, ImportError> {
        let raw_xml = raw_xml.into();
        let pmid = extract_fields(&raw_xml)
            .pmid
            .unwrap_or_else(synthesize_import_id);
        let title = format!("{REMOTE_TITLE_PREFIX}{pmid}");

        self.add_as(title, raw_xml, "remote")
    }

    /// Consumes the pending import signal, if any.
    ///
    /// The slot is cleared by the take itself, so a duplicate payload is
    /// reported once and never re-triggers.
    pub fn poll_import_signal(&self) -> Result<Option<ImportOutcome>, ImportError> {
        let Some(payload) = self.signals.take()? else {
            return Ok(None);
        };

        self.import_remote_xml(payload).map(Some)
    }

    fn add_as(
        &self,
        title: String,
        raw_xml: String,
        source: &str,
    ) -> Result<ImportOutcome, ImportError> {
        let document = Document::new(title.clone(), raw_xml);
        match self.documents.add_document(&document) {
            Ok(()) => {
                info!("event=import module=service status=ok source={source} title={title}");
                Ok(ImportOutcome::Imported { title })
            }
            Err(RepoError::DuplicateTitle(_)) => {
                warn!(
                    "event=import module=service status=duplicate source={source} title={title}"
                );
                Ok(ImportOutcome::Duplicate { title })
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Fallback id for payloads without a PMID, from the current epoch millis.
fn synthesize_import_id() -> String {
    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    format!("imported_{epoch_ms}")
}
