//! Data structures for Pareto-Lorenz analysis.

mod abundance_table;
mod curve;
mod result;

pub use abundance_table::{AbundanceTable, DEFAULT_INDEX_COLUMN};
pub use curve::{CurvePoint, CurveSet, SampleCurve};
pub use result::{GiniResult, GiniResultSet};
