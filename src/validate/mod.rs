//! Input validation for relative abundance tables.

pub mod column_sums;

pub use column_sums::{check_columns, validate_column_sums, ColumnSums, DEFAULT_TOLERANCE};
