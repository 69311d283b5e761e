//! Lorenz curve types.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One retained bin on a sample's Lorenz curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub bin_id: String,
    /// Relative abundance of this bin in the sample.
    pub abundance: f64,
    /// Running sum of abundances up to and including this bin.
    pub cumulative_abundance: f64,
    /// Position / retained length (1-indexed), so the last point is exactly 1.0.
    pub cumulative_rank_proportion: f64,
}

/// The truncated Lorenz curve of a single sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleCurve {
    pub sample_id: String,
    /// Points in rank order (most abundant bin first).
    pub points: Vec<CurvePoint>,
    /// Number of ranked bins before truncation.
    pub n_ranked: usize,
}

impl SampleCurve {
    /// Number of retained bins.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bins dropped after cumulative abundance reached 1.
    pub fn n_truncated(&self) -> usize {
        self.n_ranked - self.points.len()
    }

    /// (cumulative rank proportion, cumulative abundance) pairs for plotting.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.cumulative_rank_proportion, p.cumulative_abundance))
            .collect()
    }

    /// Cumulative relative abundance column.
    pub fn cumulative_abundances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative_abundance).collect()
    }

    /// Cumulative rank proportion column.
    pub fn rank_proportions(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.cumulative_rank_proportion)
            .collect()
    }
}

/// Curves for every sample, in input sample order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSet {
    pub curves: Vec<SampleCurve>,
}

impl CurveSet {
    pub fn new(curves: Vec<SampleCurve>) -> Self {
        Self { curves }
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn get(&self, sample_id: &str) -> Option<&SampleCurve> {
        self.curves.iter().find(|c| c.sample_id == sample_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleCurve> {
        self.curves.iter()
    }

    /// Write all curves to one long-format TSV file.
    ///
    /// Columns: `sample`, `bin`, `abundance`, `cum_rel_abund`, `cum_prop_bins`.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;

        wtr.write_record([
            "sample",
            "bin",
            "abundance",
            "cum_rel_abund",
            "cum_prop_bins",
        ])?;
        for curve in &self.curves {
            for p in &curve.points {
                wtr.write_record(&[
                    curve.sample_id.clone(),
                    p.bin_id.clone(),
                    p.abundance.to_string(),
                    p.cumulative_abundance.to_string(),
                    p.cumulative_rank_proportion.to_string(),
                ])?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn point(bin: &str, a: f64, c: f64, r: f64) -> CurvePoint {
        CurvePoint {
            bin_id: bin.to_string(),
            abundance: a,
            cumulative_abundance: c,
            cumulative_rank_proportion: r,
        }
    }

    fn create_test_set() -> CurveSet {
        CurveSet::new(vec![
            SampleCurve {
                sample_id: "S1".to_string(),
                points: vec![point("a", 0.75, 0.75, 0.5), point("b", 0.25, 1.0, 1.0)],
                n_ranked: 3,
            },
            SampleCurve {
                sample_id: "S2".to_string(),
                points: vec![],
                n_ranked: 0,
            },
        ])
    }

    #[test]
    fn test_curve_accessors() {
        let set = create_test_set();
        let s1 = set.get("S1").unwrap();
        assert_eq!(s1.len(), 2);
        assert_eq!(s1.n_truncated(), 1);
        assert_eq!(s1.xy(), vec![(0.5, 0.75), (1.0, 1.0)]);
        assert_eq!(s1.cumulative_abundances(), vec![0.75, 1.0]);
        assert_eq!(s1.rank_proportions(), vec![0.5, 1.0]);
        assert!(set.get("S2").unwrap().is_empty());
    }

    #[test]
    fn test_to_tsv() {
        let set = create_test_set();
        let file = NamedTempFile::new().unwrap();
        set.to_tsv(file.path()).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "sample\tbin\tabundance\tcum_rel_abund\tcum_prop_bins");
        assert_eq!(lines[1], "S1\ta\t0.75\t0.75\t0.5");
        assert_eq!(lines[2], "S1\tb\t0.25\t1\t1");
    }
}
