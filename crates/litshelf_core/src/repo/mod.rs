//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Document::validate()` before
//!   persistence.
//! - Repository APIs return semantic errors (`DuplicateTitle`) in addition
//!   to DB transport errors.

pub mod document_repo;
pub mod signal_repo;
