//! Free-text search entry points.
//!
//! # Responsibility
//! - Expose substring search over a snapshot of the stored collection.
//! - Keep result shaping (snippets, highlighted titles) inside core.

pub mod engine;
