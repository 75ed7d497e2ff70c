//! Cross-context import signal slot.
//!
//! # Responsibility
//! - Carry one XML payload from a remote-search collaborator to the import
//!   bridge through a named storage slot.
//! - Keep the slot edge-triggered: consuming it clears it in the same
//!   statement.
//!
//! # Invariants
//! - At most one payload is pending per slot; a second publish overwrites
//!   the first.
//! - `take()` never returns the same payload twice.

use crate::repo::document_repo::RepoResult;
use rusqlite::{Connection, OptionalExtension};

/// Name of the single transport slot used for remote imports.
const IMPORT_SLOT: &str = "pubmed_import";

/// Transport contract between the remote-search collaborator (writer) and
/// the import bridge (consumer).
pub trait ImportSignalRepository {
    /// Writes a payload into the slot, replacing any pending one.
    fn publish(&self, payload: &str) -> RepoResult<()>;
    /// Takes the pending payload, clearing the slot atomically.
    fn take(&self) -> RepoResult<Option<String>>;
    /// Returns whether a payload is currently pending.
    fn is_pending(&self) -> RepoResult<bool>;
}

/// SQLite-backed one-shot signal slot.
pub struct SqliteImportSignalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteImportSignalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ImportSignalRepository for SqliteImportSignalRepository<'_> {
    fn publish(&self, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO import_signal (slot, payload)
             VALUES (?1, ?2)
             ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                written_at = (strftime('%s', 'now') * 1000);",
            [IMPORT_SLOT, payload],
        )?;
        Ok(())
    }

    fn take(&self) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "DELETE FROM import_signal WHERE slot = ?1 RETURNING payload;",
                [IMPORT_SLOT],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn is_pending(&self) -> RepoResult<bool> {
        let pending: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM import_signal WHERE slot = ?1);",
            [IMPORT_SLOT],
            |row| row.get(0),
        )?;
        Ok(pending == 1)
    }
}
