//! Removal of bins that are absent from every sample.

use crate::data::AbundanceTable;
use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of zero-bin pruning.
#[derive(Debug, Clone)]
pub struct PruneResult {
    /// Table without the all-zero bins, survivors in original row order.
    pub table: AbundanceTable,
    /// Statistics about what was removed.
    pub summary: PruneSummary,
}

/// Statistics about pruned bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneSummary {
    /// Number of bins before pruning.
    pub n_before: usize,
    /// Number of bins after pruning.
    pub n_after: usize,
    /// Identifiers of the removed bins, in original row order.
    pub removed_bins: Vec<String>,
}

impl PruneSummary {
    pub fn n_removed(&self) -> usize {
        self.n_before - self.n_after
    }
}

impl std::fmt::Display for PruneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Zero-bin pruning")?;
        writeln!(f, "  Bins before:  {}", self.n_before)?;
        writeln!(f, "  Bins after:   {}", self.n_after)?;
        writeln!(f, "  Bins removed: {}", self.n_removed())?;
        Ok(())
    }
}

/// Drop every bin whose abundance sums to exactly zero across all samples.
///
/// Pruning everything is not an error: the returned table then has no
/// rows and later stages produce empty curves.
pub fn prune_zero_bins(table: &AbundanceTable) -> Result<PruneResult> {
    let row_sums = table.row_sums();

    let mut keep_indices = Vec::with_capacity(table.n_bins());
    let mut removed_bins = Vec::new();
    for (row, &sum) in row_sums.iter().enumerate() {
        if sum == 0.0 {
            debug!("removing bin '{}' as it is empty", table.bin_ids()[row]);
            removed_bins.push(table.bin_ids()[row].clone());
        } else {
            keep_indices.push(row);
        }
    }

    let pruned = table.subset_bins(&keep_indices)?;
    let summary = PruneSummary {
        n_before: table.n_bins(),
        n_after: pruned.n_bins(),
        removed_bins,
    };

    Ok(PruneResult {
        table: pruned,
        summary,
    })
}
