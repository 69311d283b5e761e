//! Gini coefficient of a sample's abundance distribution.
//!
//! The coefficient is half the relative mean absolute difference:
//!
//! G = (1 / 2) · (Σᵢ Σⱼ |xᵢ − xⱼ| / n²) / mean(x)
//!
//! 0 means every bin holds the same abundance; a single bin holding
//! everything gives (n − 1) / n. The finite-sample correction scales by
//! n / (n − 1) so that this maximum becomes 1.

use crate::data::{GiniResult, GiniResultSet};
use crate::rank::RankedSample;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Estimator used for the raw coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiniMethod {
    /// Mean absolute difference over all pairs. O(n²) time; fine for the
    /// few hundred to few thousand bins of a community survey.
    #[default]
    Pairwise,
    /// Equivalent rank formula on sorted values. O(n log n).
    Sorted,
}

impl GiniMethod {
    pub fn name(&self) -> &'static str {
        match self {
            GiniMethod::Pairwise => "pairwise",
            GiniMethod::Sorted => "sorted",
        }
    }

    /// Compute the raw coefficient with this estimator.
    pub fn gini(&self, values: &[f64]) -> Option<f64> {
        match self {
            GiniMethod::Pairwise => gini_pairwise(values),
            GiniMethod::Sorted => gini_sorted(values),
        }
    }
}

fn positive_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().mean();
    if mean > 0.0 {
        Some(mean)
    } else {
        None
    }
}

/// Gini coefficient via the mean absolute pairwise difference.
///
/// Every ordered pair is visited, including each value with itself, so the
/// cost is quadratic in the number of bins.
///
/// Returns `None` for an empty slice or when all values are zero.
pub fn gini_pairwise(values: &[f64]) -> Option<f64> {
    let mean = positive_mean(values)?;
    let n = values.len() as f64;

    let sum_abs_diff: f64 = values
        .iter()
        .map(|&xi| values.iter().map(|&xj| (xi - xj).abs()).sum::<f64>())
        .sum();

    let mad = sum_abs_diff / (n * n);
    let rmad = mad / mean;
    Some(0.5 * rmad)
}

/// Gini coefficient via the sorted-rank formula.
///
/// With values in ascending order and 1-indexed ranks,
/// G = Σᵢ (2i − n − 1) · x₍ᵢ₎ / (n² · mean). Gives the same value as
/// [`gini_pairwise`] up to rounding.
pub fn gini_sorted(values: &[f64]) -> Option<f64> {
    let mean = positive_mean(values)?;
    let n = values.len() as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| (2.0 * (i as f64 + 1.0) - n - 1.0) * x)
        .sum();

    Some(weighted / (n * n * mean))
}

/// Small-sample corrected coefficient, `gini * n / (n - 1)`.
///
/// Undefined (`None`) for `n <= 1`.
pub fn corrected_gini(gini: Option<f64>, n: usize) -> Option<f64> {
    if n <= 1 {
        return None;
    }
    let n = n as f64;
    gini.map(|g| g * (n / (n - 1.0)))
}

/// Score one ranked sample (untruncated, after pruning).
pub fn score_sample(ranked: &RankedSample, method: GiniMethod) -> GiniResult {
    let values = ranked.abundances();
    let n = values.len();

    let gini = method.gini(&values);
    let corrected = corrected_gini(gini, n);

    if gini.is_none() {
        warn!(
            "sample '{}' has no abundance to score (n = {})",
            ranked.sample_id, n
        );
    } else if corrected.is_none() {
        warn!(
            "sample '{}' has n = {}, corrected Gini is undefined",
            ranked.sample_id, n
        );
    }
    debug!(
        "sample '{}': gini={:?} corrected={:?} n={}",
        ranked.sample_id, gini, corrected, n
    );

    GiniResult {
        sample_id: ranked.sample_id.clone(),
        gini,
        corrected_gini: corrected,
        n,
    }
}

/// Score every ranked sample, in order.
pub fn score_samples(ranked: &[RankedSample], method: GiniMethod) -> GiniResultSet {
    let results = ranked.iter().map(|r| score_sample(r, method)).collect();
    GiniResultSet::new(method.name().to_string(), results)
}
