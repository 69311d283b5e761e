//! plcurve - Pareto-Lorenz curve CLI
//!
//! Reads a relative abundance table, plots the Lorenz curve of every sample
//! and writes the Gini coefficients.

use clap::{Parser, ValueEnum};
use log::info;
use pareto_lorenz::data::{AbundanceTable, DEFAULT_INDEX_COLUMN};
use pareto_lorenz::error::Result;
use pareto_lorenz::inequality::GiniMethod;
use pareto_lorenz::pipeline::{Pipeline, PipelineConfig};
use pareto_lorenz::plot::{plot_curves, PlotOptions};
use std::path::{Path, PathBuf};

/// CLI-friendly Gini estimator enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliGiniMethod {
    /// Mean absolute difference over all pairs (O(n²))
    Pairwise,
    /// Sorted-rank formula (O(n log n))
    Sorted,
}

impl From<CliGiniMethod> for GiniMethod {
    fn from(method: CliGiniMethod) -> Self {
        match method {
            CliGiniMethod::Pairwise => GiniMethod::Pairwise,
            CliGiniMethod::Sorted => GiniMethod::Sorted,
        }
    }
}

/// Format of the coefficients file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Tsv,
    Json,
}

/// Pareto-Lorenz curves and Gini coefficients
#[derive(Parser)]
#[command(name = "plcurve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the relative abundance TSV (samples as columns, each summing to 1)
    input: PathBuf,

    /// Graph file name
    #[arg(short, long, default_value = "graph.png")]
    graph: PathBuf,

    /// Output data file name (default: <INPUT>.output.tsv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the curve points as long-format TSV
    #[arg(long)]
    curves: Option<PathBuf>,

    /// Name of the column holding bin identifiers
    #[arg(long, default_value = DEFAULT_INDEX_COLUMN)]
    index_column: String,

    /// Pipeline configuration YAML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allowed deviation of column sums from 1 (overrides config)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Cumulative abundance at which curves are cut (overrides config)
    #[arg(long)]
    threshold: Option<f64>,

    /// Gini estimator (overrides config)
    #[arg(long, value_enum)]
    gini_method: Option<CliGiniMethod>,

    /// Format of the coefficients file
    #[arg(short, long, value_enum, default_value = "tsv")]
    format: OutputFormat,

    /// Chart title
    #[arg(long)]
    title: Option<String>,
}

fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".output.tsv");
    PathBuf::from(name)
}

fn main() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    println!("Input file: {}", cli.input.display());
    println!("Output file: {}", output.display());
    println!("Graph file: {}", cli.graph.display());

    let mut config = match &cli.config {
        Some(path) => {
            info!("loading pipeline configuration from {}", path.display());
            PipelineConfig::from_file(path)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(tolerance) = cli.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(threshold) = cli.threshold {
        config.truncation_threshold = threshold;
    }
    if let Some(method) = cli.gini_method {
        config.gini_method = method.into();
    }

    let table = AbundanceTable::from_tsv(&cli.input, &cli.index_column)?;
    info!(
        "loaded {} bins x {} samples",
        table.n_bins(),
        table.n_samples()
    );

    let analysis = Pipeline::from_config(&config).run(&table)?;

    println!("{}", analysis.gini);

    match cli.format {
        OutputFormat::Tsv => analysis.gini.to_tsv(&output)?,
        OutputFormat::Json => analysis.gini.to_json(&output)?,
    }
    info!("wrote coefficients to {}", output.display());

    if let Some(path) = &cli.curves {
        analysis.curves.to_tsv(path)?;
        info!("wrote curve points to {}", path.display());
    }

    let options = PlotOptions {
        caption: cli.title.clone(),
        ..PlotOptions::default()
    };
    plot_curves(&analysis.curves, &cli.graph, &options)?;

    Ok(())
}
