//! Pipeline composition and execution.

mod runner;

pub use runner::{run_pl_analysis, PlAnalysis, Pipeline, PipelineConfig};
