//! Text statistics for the per-article dashboard.

pub mod text_stats;
