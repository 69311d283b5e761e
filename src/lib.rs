//! Pareto-Lorenz Curve Library
//!
//! This library computes Pareto-Lorenz (PL) curves and Gini coefficients
//! from relative abundance tables, a standard evenness analysis for
//! microbial and other ecological communities.
//!
//! # Overview
//!
//! The library is organized into small stages, each a pure function:
//!
//! - **data**: Core data structures (AbundanceTable, SampleCurve, GiniResultSet)
//! - **validate**: Column-sum validation (every sample must sum to 1)
//! - **filter**: Removal of bins absent from every sample
//! - **rank**: Per-sample ranking of bins by abundance
//! - **curve**: Cumulative abundance, truncation and rank proportions
//! - **inequality**: Gini and corrected Gini coefficients
//! - **plot**: PNG rendering of all curves on one chart
//! - **pipeline**: Pipeline configuration and execution
//!
//! # Example
//!
//! ```no_run
//! use pareto_lorenz::prelude::*;
//!
//! let table = AbundanceTable::from_tsv("abundances.tsv", DEFAULT_INDEX_COLUMN).unwrap();
//!
//! let analysis = Pipeline::new()
//!     .name("soil survey")
//!     .run(&table)
//!     .unwrap();
//!
//! analysis.gini.to_tsv("abundances.tsv.output.tsv").unwrap();
//! plot_curves(&analysis.curves, "graph.png", &PlotOptions::default()).unwrap();
//! ```

pub mod curve;
pub mod data;
pub mod error;
pub mod filter;
pub mod inequality;
pub mod pipeline;
pub mod plot;
pub mod rank;
pub mod validate;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::curve::{
        build_curve, build_curves, cumulative_abundance, rank_proportions, truncation_point,
        DEFAULT_TRUNCATION_THRESHOLD,
    };
    pub use crate::data::{
        AbundanceTable, CurvePoint, CurveSet, GiniResult, GiniResultSet, SampleCurve,
        DEFAULT_INDEX_COLUMN,
    };
    pub use crate::error::{PlError, Result};
    pub use crate::filter::{prune_zero_bins, PruneResult, PruneSummary};
    pub use crate::inequality::{
        corrected_gini, gini_pairwise, gini_sorted, score_sample, score_samples, GiniMethod,
    };
    pub use crate::pipeline::{run_pl_analysis, PlAnalysis, Pipeline, PipelineConfig};
    pub use crate::plot::{curve_series, plot_curves, PlotOptions};
    pub use crate::rank::{rank_sample, rank_samples, RankedBin, RankedSample};
    pub use crate::validate::{check_columns, validate_column_sums, ColumnSums, DEFAULT_TOLERANCE};
}
