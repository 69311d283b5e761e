//! Pipeline runner for the Pareto-Lorenz analysis.
//!
//! Stages always run in the same order:
//! validate → prune → rank → curves → scores.
//! Each stage returns new values; the input table is never modified.

use crate::curve::{build_curves, DEFAULT_TRUNCATION_THRESHOLD};
use crate::data::{AbundanceTable, CurveSet, GiniResultSet};
use crate::error::{PlError, Result};
use crate::filter::{prune_zero_bins, PruneSummary};
use crate::inequality::{score_samples, GiniMethod};
use crate::rank::{rank_samples, RankedSample};
use crate::validate::{validate_column_sums, ColumnSums, DEFAULT_TOLERANCE};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_name() -> String {
    "pl-curve".to_string()
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_threshold() -> f64 {
    DEFAULT_TRUNCATION_THRESHOLD
}

/// Pipeline configuration for serialization.
///
/// Every field is optional in YAML and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name of the pipeline.
    #[serde(default = "default_name")]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Allowed deviation of each column sum from 1.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Cumulative abundance after which a curve is cut.
    #[serde(default = "default_threshold")]
    pub truncation_threshold: f64,
    /// Estimator for the raw Gini coefficient.
    #[serde(default)]
    pub gini_method: GiniMethod,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: None,
            tolerance: DEFAULT_TOLERANCE,
            truncation_threshold: DEFAULT_TRUNCATION_THRESHOLD,
            gini_method: GiniMethod::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(PlError::from)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(PlError::from)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PlError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.truncation_threshold > 0.0 && self.truncation_threshold <= 1.0) {
            return Err(PlError::InvalidParameter(format!(
                "truncation_threshold must be in (0, 1], got {}",
                self.truncation_threshold
            )));
        }
        Ok(())
    }
}

/// Everything produced by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlAnalysis {
    /// Name of the pipeline that produced this analysis.
    pub name: String,
    /// Column sums of the validated input.
    pub column_sums: ColumnSums,
    /// What zero-bin pruning removed.
    pub prune: PruneSummary,
    /// Input table without all-zero bins.
    pub table: AbundanceTable,
    /// Untruncated ranked samples.
    pub ranked: Vec<RankedSample>,
    /// Truncated Lorenz curves.
    pub curves: CurveSet,
    /// Gini coefficients per sample.
    pub gini: GiniResultSet,
}

/// Builder for configuring and running the analysis.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Set the pipeline name.
    pub fn name(mut self, name: &str) -> Self {
        self.config.name = name.to_string();
        self
    }

    /// Set the column-sum tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the cumulative abundance at which curves are truncated.
    pub fn truncation_threshold(mut self, threshold: f64) -> Self {
        self.config.truncation_threshold = threshold;
        self
    }

    /// Choose the Gini estimator.
    pub fn gini_method(mut self, method: GiniMethod) -> Self {
        self.config.gini_method = method;
        self
    }

    /// Convert to config for serialization.
    pub fn to_config(&self, description: Option<&str>) -> PipelineConfig {
        PipelineConfig {
            description: description.map(String::from),
            ..self.config.clone()
        }
    }

    /// Run the pipeline on a table.
    ///
    /// # Errors
    /// A column-sum failure is returned unchanged as `PlError::ColumnSum`;
    /// any later stage failure is wrapped in `PlError::Pipeline`.
    pub fn run(&self, table: &AbundanceTable) -> Result<PlAnalysis> {
        self.config.validate()?;
        info!(
            "running '{}' on {} bins x {} samples",
            self.config.name,
            table.n_bins(),
            table.n_samples()
        );

        let column_sums = validate_column_sums(table, self.config.tolerance)?;

        let pruned = prune_zero_bins(table).map_err(|e| stage_error("prune", e))?;
        info!(
            "pruned {} empty bins, {} remain",
            pruned.summary.n_removed(),
            pruned.summary.n_after
        );

        let ranked = rank_samples(&pruned.table).map_err(|e| stage_error("rank", e))?;
        let curves = build_curves(&ranked, self.config.truncation_threshold);
        let gini = score_samples(&ranked, self.config.gini_method);
        info!(
            "built {} curves, {} samples with undefined coefficients",
            curves.len(),
            gini.undefined().len()
        );

        Ok(PlAnalysis {
            name: self.config.name.clone(),
            column_sums,
            prune: pruned.summary,
            table: pruned.table,
            ranked,
            curves,
            gini,
        })
    }
}

fn stage_error(stage: &str, err: PlError) -> PlError {
    PlError::Pipeline(format!("stage '{}' failed: {}", stage, err))
}

/// Run the analysis with default settings.
pub fn run_pl_analysis(table: &AbundanceTable) -> Result<PlAnalysis> {
    Pipeline::new().run(table)
}
