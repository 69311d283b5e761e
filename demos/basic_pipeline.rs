//! Basic example demonstrating the Pareto-Lorenz pipeline.
//!
//! This example shows how to:
//! 1. Build a relative abundance table
//! 2. Run the pipeline
//! 3. Examine curves and Gini coefficients
//! 4. Write the coefficient table and plot

use pareto_lorenz::prelude::*;

fn main() -> Result<()> {
    println!("=== Pareto-Lorenz Example ===\n");

    let table = create_example_data()?;

    println!("Data dimensions:");
    println!("  Bins:    {}", table.n_bins());
    println!("  Samples: {}", table.n_samples());
    println!();

    println!("=== Running Pipeline ===\n");

    let analysis = Pipeline::new().name("PL-example").run(&table)?;

    print!("{}", analysis.prune);
    println!();

    for curve in analysis.curves.iter() {
        println!(
            "{}: {} of {} bins reach 100% abundance",
            curve.sample_id,
            curve.len(),
            curve.n_ranked
        );
        if let Some(first) = curve.points.first() {
            println!(
                "  top bin {} holds {:.1}%",
                first.bin_id,
                first.abundance * 100.0
            );
        }
    }
    println!();

    println!("=== Gini Coefficients ===\n");
    print!("{}", analysis.gini);

    let out_dir = std::env::temp_dir();
    let gini_path = out_dir.join("pl_example.output.tsv");
    let graph_path = out_dir.join("pl_example.png");
    analysis.gini.to_tsv(&gini_path)?;
    println!("\nCoefficients written to {}", gini_path.display());

    match plot_curves(&analysis.curves, &graph_path, &PlotOptions::default()) {
        Ok(()) => println!("Plot written to {}", graph_path.display()),
        Err(e) => println!("Plot skipped: {}", e),
    }

    Ok(())
}

/// Three communities from even to strongly dominated, plus one bin
/// never observed.
fn create_example_data() -> Result<AbundanceTable> {
    let bin_ids: Vec<String> = (1..=8).map(|i| format!("OTU_{}", i)).collect();
    let sample_ids = vec![
        "meadow".to_string(),
        "forest".to_string(),
        "bloom".to_string(),
    ];
    let columns = vec![
        vec![0.15, 0.14, 0.14, 0.13, 0.12, 0.12, 0.2, 0.0],
        vec![0.35, 0.25, 0.15, 0.1, 0.08, 0.05, 0.02, 0.0],
        vec![0.88, 0.06, 0.03, 0.02, 0.01, 0.0, 0.0, 0.0],
    ];
    AbundanceTable::from_columns(bin_ids, sample_ids, &columns)
}
