//! Pareto-Lorenz curve construction.
//!
//! A curve plots, for bins ranked from most to least abundant, the
//! cumulative proportion of bins (x) against the cumulative relative
//! abundance they hold (y). Steeper curves mean a few bins dominate.

pub mod cumulative;
pub mod lorenz;
pub mod truncate;

pub use cumulative::{cumulative_abundance, rank_proportions};
pub use lorenz::{build_curve, build_curves};
pub use truncate::{truncation_point, DEFAULT_TRUNCATION_THRESHOLD};
