//! Per-sample ranking of bins by abundance.

use crate::data::AbundanceTable;
use crate::error::{PlError, Result};
use serde::{Deserialize, Serialize};

/// A bin and its abundance within one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBin {
    pub bin_id: String,
    pub abundance: f64,
}

/// One sample's bins, most abundant first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSample {
    pub sample_id: String,
    pub bins: Vec<RankedBin>,
}

impl RankedSample {
    /// Rank `(bin, abundance)` pairs given in source row order.
    ///
    /// The sort is stable, so bins of equal abundance keep their row order.
    pub fn from_pairs(sample_id: impl Into<String>, mut bins: Vec<RankedBin>) -> Self {
        bins.sort_by(|a, b| b.abundance.total_cmp(&a.abundance));
        Self {
            sample_id: sample_id.into(),
            bins,
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Abundances in rank order.
    pub fn abundances(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.abundance).collect()
    }

    /// Bin identifiers in rank order.
    pub fn bin_ids(&self) -> Vec<&str> {
        self.bins.iter().map(|b| b.bin_id.as_str()).collect()
    }
}

/// Rank the bins of a single sample by descending abundance.
pub fn rank_sample(table: &AbundanceTable, sample_idx: usize) -> Result<RankedSample> {
    if sample_idx >= table.n_samples() {
        return Err(PlError::InvalidParameter(format!(
            "Sample index {} out of bounds",
            sample_idx
        )));
    }

    let bins = table
        .bin_ids()
        .iter()
        .zip(table.column(sample_idx))
        .map(|(bin_id, abundance)| RankedBin {
            bin_id: bin_id.clone(),
            abundance,
        })
        .collect();

    Ok(RankedSample::from_pairs(
        table.sample_ids()[sample_idx].clone(),
        bins,
    ))
}

/// Rank every sample independently, in input sample order.
pub fn rank_samples(table: &AbundanceTable) -> Result<Vec<RankedSample>> {
    (0..table.n_samples())
        .map(|j| rank_sample(table, j))
        .collect()
}
