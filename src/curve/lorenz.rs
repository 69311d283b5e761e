//! Lorenz curve construction from ranked samples.

use super::cumulative::{cumulative_abundance, rank_proportions};
use super::truncate::truncation_point;
use crate::data::{CurvePoint, CurveSet, SampleCurve};
use crate::rank::RankedSample;
use log::{debug, warn};

/// Build the truncated Lorenz curve of one ranked sample.
///
/// Order of operations:
/// 1. cumulative relative abundance over the full ranked sequence
/// 2. truncation after the first value above `threshold`
/// 3. cumulative rank proportion over the retained bins only
///
/// Because step 3 runs last, the x-axis always ends at exactly 1.0 on the
/// last retained bin.
pub fn build_curve(ranked: &RankedSample, threshold: f64) -> SampleCurve {
    let abundances = ranked.abundances();
    let cumulative = cumulative_abundance(&abundances);
    let keep = truncation_point(&cumulative, threshold);
    let proportions = rank_proportions(keep);

    if ranked.is_empty() {
        warn!("sample '{}' has no bins, curve is empty", ranked.sample_id);
    } else if keep == ranked.len() && cumulative[keep - 1] <= threshold {
        warn!(
            "sample '{}' never reaches cumulative abundance {} (max {})",
            ranked.sample_id,
            threshold,
            cumulative[keep - 1]
        );
    }

    let points: Vec<CurvePoint> = ranked
        .bins
        .iter()
        .zip(cumulative)
        .zip(proportions)
        .map(|((bin, cumulative_abundance), cumulative_rank_proportion)| CurvePoint {
            bin_id: bin.bin_id.clone(),
            abundance: bin.abundance,
            cumulative_abundance,
            cumulative_rank_proportion,
        })
        .collect();

    debug!(
        "sample '{}': kept {} of {} ranked bins",
        ranked.sample_id,
        points.len(),
        ranked.len()
    );

    SampleCurve {
        sample_id: ranked.sample_id.clone(),
        points,
        n_ranked: ranked.len(),
    }
}

/// Build curves for every sample.
pub fn build_curves(ranked: &[RankedSample], threshold: f64) -> CurveSet {
    CurveSet::new(ranked.iter().map(|r| build_curve(r, threshold)).collect())
}
