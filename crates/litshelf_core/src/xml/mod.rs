//! PubMed-style XML field extraction.
//!
//! # Responsibility
//! - Derive display-ready article fields from raw stored XML.
//! - Keep parse failures contained: a malformed document degrades to
//!   default field values instead of failing the collection.

pub mod fields;
