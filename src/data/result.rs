//! Result types for inequality scoring.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Gini coefficients for a single sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiniResult {
    /// Sample identifier.
    pub sample_id: String,
    /// Raw Gini coefficient; `None` for an empty or all-zero sample.
    pub gini: Option<f64>,
    /// Small-sample corrected Gini, `gini * n / (n - 1)`; `None` when n <= 1.
    pub corrected_gini: Option<f64>,
    /// Number of bins scored (after pruning, before truncation).
    pub n: usize,
}

impl GiniResult {
    /// Whether both coefficients are defined.
    pub fn is_defined(&self) -> bool {
        self.gini.is_some() && self.corrected_gini.is_some()
    }
}

/// Collection of per-sample Gini results, in input sample order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiniResultSet {
    /// Estimator used to compute the coefficients.
    pub method: String,
    pub results: Vec<GiniResult>,
}

impl GiniResultSet {
    pub fn new(method: String, results: Vec<GiniResult>) -> Self {
        Self { method, results }
    }

    /// Number of samples scored.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Look up the result for a sample.
    pub fn get(&self, sample_id: &str) -> Option<&GiniResult> {
        self.results.iter().find(|r| r.sample_id == sample_id)
    }

    /// Samples whose corrected coefficient could not be computed.
    pub fn undefined(&self) -> Vec<&GiniResult> {
        self.results.iter().filter(|r| !r.is_defined()).collect()
    }

    /// Iterate over results.
    pub fn iter(&self) -> impl Iterator<Item = &GiniResult> {
        self.results.iter()
    }

    /// Write results to a TSV file.
    ///
    /// The header leaves the index cell blank, followed by
    /// `Gini`, `Corrected Gini` and `n`. Undefined values are written as `NaN`.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_tsv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write results as TSV to any writer.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "\tGini\tCorrected Gini\tn")?;
        for r in &self.results {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                r.sample_id,
                format_coefficient(r.gini),
                format_coefficient(r.corrected_gini),
                r.n
            )?;
        }
        Ok(())
    }

    /// Write results to a pretty-printed JSON file; undefined values become `null`.
    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for GiniResultSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .results
            .iter()
            .map(|r| r.sample_id.len())
            .max()
            .unwrap_or(0)
            .max(6);
        writeln!(
            f,
            "{:<width$}  {:>10}  {:>14}  {:>6}",
            "Sample",
            "Gini",
            "Corrected Gini",
            "n",
            width = width
        )?;
        for r in &self.results {
            writeln!(
                f,
                "{:<width$}  {:>10}  {:>14}  {:>6}",
                r.sample_id,
                format_short(r.gini),
                format_short(r.corrected_gini),
                r.n,
                width = width
            )?;
        }
        Ok(())
    }
}

fn format_coefficient(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

fn format_short(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "NaN".to_string(),
    }
}
