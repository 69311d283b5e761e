//! Column-sum check: every sample must be a proper composition.
//!
//! Relative abundances within a sample have to add up to 1. Tables that
//! were not normalized, or that lost bins on export, are rejected before any
//! curve is built.

use crate::data::AbundanceTable;
use crate::error::{PlError, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Allowed absolute deviation of a column sum from 1.0.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Column sums of a table that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSums {
    pub sample_ids: Vec<String>,
    pub sums: Vec<f64>,
    /// Tolerance the sums were checked against.
    pub tolerance: f64,
}

impl ColumnSums {
    /// Largest absolute deviation from 1.0 across samples.
    pub fn max_deviation(&self) -> f64 {
        self.sums
            .iter()
            .map(|s| (s - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

fn within_tolerance(sum: f64, tolerance: f64) -> bool {
    // NaN fails both comparisons
    sum >= 1.0 - tolerance && sum <= 1.0 + tolerance
}

fn check_tolerance(tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(PlError::InvalidParameter(format!(
            "tolerance must be a positive finite number, got {}",
            tolerance
        )));
    }
    Ok(())
}

/// Check that every sample column sums to 1 within `tolerance`.
///
/// With the default tolerance the accepted range is `[0.9999, 1.0001]`.
///
/// # Errors
/// `PlError::ColumnSum` naming the first sample outside the range, or
/// `PlError::InvalidParameter` for a non-positive tolerance.
pub fn validate_column_sums(table: &AbundanceTable, tolerance: f64) -> Result<ColumnSums> {
    check_tolerance(tolerance)?;

    let sums = table.col_sums();
    for (sample_id, &sum) in table.sample_ids().iter().zip(sums.iter()) {
        debug!("sample '{}' sums to {}", sample_id, sum);
        if !within_tolerance(sum, tolerance) {
            return Err(PlError::ColumnSum {
                sample: sample_id.clone(),
                sum,
            });
        }
    }

    Ok(ColumnSums {
        sample_ids: table.sample_ids().to_vec(),
        sums,
        tolerance,
    })
}

/// Non-failing form of [`validate_column_sums`].
pub fn check_columns(table: &AbundanceTable, tolerance: f64) -> bool {
    validate_column_sums(table, tolerance).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_column(values: Vec<f64>) -> AbundanceTable {
        let bin_ids = (0..values.len()).map(|i| format!("bin_{}", i)).collect();
        AbundanceTable::from_columns(bin_ids, vec!["S1".to_string()], &[values]).unwrap()
    }

    #[test]
    fn test_accepts_exact_sum() {
        let table = table_with_column(vec![0.5, 0.3, 0.2]);
        let sums = validate_column_sums(&table, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(sums.sample_ids, vec!["S1"]);
        assert!(sums.max_deviation() < 1e-12);
    }

    #[test]
    fn test_accepts_within_tolerance() {
        assert!(check_columns(&table_with_column(vec![0.99995]), DEFAULT_TOLERANCE));
        assert!(check_columns(&table_with_column(vec![1.00005]), DEFAULT_TOLERANCE));
        assert!(check_columns(&table_with_column(vec![0.6, 0.39995]), DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_rejects_half_and_one_and_a_half() {
        assert!(!check_columns(&table_with_column(vec![0.25, 0.25]), DEFAULT_TOLERANCE));
        assert!(!check_columns(&table_with_column(vec![1.0, 0.5]), DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_rejects_just_outside_tolerance() {
        assert!(!check_columns(&table_with_column(vec![0.9998]), DEFAULT_TOLERANCE));
        assert!(!check_columns(&table_with_column(vec![1.0002]), DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_error_names_offending_sample() {
        let table = AbundanceTable::from_columns(
            vec!["a".into(), "b".into()],
            vec!["good".into(), "bad".into()],
            &[vec![0.5, 0.5], vec![0.7, 0.7]],
        )
        .unwrap();

        match validate_column_sums(&table, DEFAULT_TOLERANCE) {
            Err(PlError::ColumnSum { sample, sum }) => {
                assert_eq!(sample, "bad");
                assert!((sum - 1.4).abs() < 1e-12);
            }
            other => panic!("expected ColumnSum error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_message() {
        let err = validate_column_sums(&table_with_column(vec![0.5]), DEFAULT_TOLERANCE)
            .unwrap_err();
        assert!(err.to_string().starts_with("columns don't sum to 1"));
    }

    #[test]
    fn test_custom_tolerance() {
        let table = table_with_column(vec![0.95]);
        assert!(!check_columns(&table, DEFAULT_TOLERANCE));
        assert!(check_columns(&table, 0.1));
    }

    #[test]
    fn test_invalid_tolerance() {
        let table = table_with_column(vec![1.0]);
        assert!(matches!(
            validate_column_sums(&table, 0.0),
            Err(PlError::InvalidParameter(_))
        ));
        assert!(matches!(
            validate_column_sums(&table, f64::NAN),
            Err(PlError::InvalidParameter(_))
        ));
    }
}
