//! Document store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable append/read APIs over the `documents` table.
//! - Enforce the title-uniqueness dedup contract at the write boundary.
//!
//! # Invariants
//! - A rejected duplicate leaves the store byte-for-byte unchanged.
//! - Listing returns documents in insertion order; there is no ranking and
//!   no delete operation.

use crate::db::DbError;
use crate::model::document::{Document, DocumentValidationError};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DOCUMENT_SELECT_SQL: &str = "SELECT
    title,
    raw_xml
FROM documents";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for document persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(DocumentValidationError),
    Db(DbError),
    /// A document with the same store key already exists; nothing was
    /// written.
    DuplicateTitle(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateTitle(title) => {
                write!(f, "document `{title}` already exists")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted document data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateTitle(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DocumentValidationError> for RepoError {
    fn from(value: DocumentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the library document store.
pub trait DocumentRepository {
    /// Appends one document; rejects duplicate titles without mutating the
    /// store.
    fn add_document(&self, document: &Document) -> RepoResult<()>;
    /// Looks up one document by its store key.
    fn get_document(&self, title: &str) -> RepoResult<Option<Document>>;
    /// Lists all documents in insertion order.
    fn list_documents(&self) -> RepoResult<Vec<Document>>;
    /// Returns the number of stored documents.
    fn count_documents(&self) -> RepoResult<u64>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn add_document(&self, document: &Document) -> RepoResult<()> {
        document.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO documents (title, raw_xml) VALUES (?1, ?2);",
            params![document.title.as_str(), document.raw_xml.as_str()],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::DuplicateTitle(document.title.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_document(&self, title: &str) -> RepoResult<Option<Document>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCUMENT_SELECT_SQL} WHERE title = ?1;"))?;

        let mut rows = stmt.query([title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row)?));
        }

        Ok(None)
    }

    fn list_documents(&self) -> RepoResult<Vec<Document>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCUMENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }

        Ok(documents)
    }

    fn count_documents(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents;", [], |row| row.get(0))?;

        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative document count `{count}`")))
    }
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let document = Document {
        title: row.get("title")?,
        raw_xml: row.get("raw_xml")?,
    };
    document.validate()?;
    Ok(document)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
    )
}
