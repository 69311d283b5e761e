//! Filtering primitives for abundance tables.

pub mod zero_bins;

pub use zero_bins::{prune_zero_bins, PruneResult, PruneSummary};
