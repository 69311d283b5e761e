//! Ranking of bins within each sample.

pub mod sort;

pub use sort::{rank_sample, rank_samples, RankedBin, RankedSample};
