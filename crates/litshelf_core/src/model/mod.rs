//! Domain model for stored literature records.
//!
//! # Responsibility
//! - Define the canonical document shape persisted by the library store.
//!
//! # Invariants
//! - A document is identified by its `title`; no two stored documents share
//!   one.
//! - Raw XML is stored verbatim and never mutated in place.

pub mod document;
