//! medviz: Medical Examination Visualizer CLI
//!
//! Loads a medical examination dataset, derives clinical indicators and
//! writes a categorical count plot and a correlation heatmap.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use medviz::cli::Cli;
use medviz::pipeline::{load_dataset, preprocess, prevalence, ExamColumn};
use medviz::plot::{draw_cat_plot, draw_heat_map};
use medviz::report::{export_correlation_json, ExportParams, RunSummary};
use medviz::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let bounds = cli.quantile_bounds()?;

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &cli.catplot, &cli.heatmap, &bounds);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading examination records...");
    let (mut df, rows, cols, memory_mb) = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let mut summary = RunSummary::new(rows, cols);
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Step 2: Derive indicators
    print_step_header(2, "Derive Indicators");

    let step_start = Instant::now();
    preprocess(&mut df)?;
    summary.overweight_share = prevalence(&df, ExamColumn::Overweight)?;
    summary.cholesterol_share = prevalence(&df, ExamColumn::Cholesterol)?;
    summary.gluc_share = prevalence(&df, ExamColumn::Gluc)?;
    print_success("Added overweight, binarized cholesterol and gluc");
    let preprocess_elapsed = step_start.elapsed();
    summary.set_preprocess_time(preprocess_elapsed);
    print_step_time(preprocess_elapsed);

    // Step 3: Categorical plot
    print_step_header(3, "Categorical Plot");

    let step_start = Instant::now();
    let spinner = create_spinner("Counting indicators by cardio...");
    let catplot = draw_cat_plot(&df, &cli.catplot)?;
    finish_with_success(&spinner, &format!("Saved to {}", cli.catplot.display()));
    print_info(&format!(
        "{} long-form records across {} facet(s)",
        catplot.record_count,
        catplot.facets.len()
    ));
    summary.add_output(cli.catplot.clone());
    let catplot_elapsed = step_start.elapsed();
    summary.set_catplot_time(catplot_elapsed);
    print_step_time(catplot_elapsed);

    // Step 4: Heatmap
    print_step_header(4, "Correlation Heatmap");

    let step_start = Instant::now();
    let spinner = create_spinner("Filtering outliers and correlating...");
    let heatmap = draw_heat_map(&df, &cli.heatmap, &bounds)?;
    finish_with_success(&spinner, &format!("Saved to {}", cli.heatmap.display()));
    print_info(&format!(
        "{} of {} rows kept after outlier filtering",
        heatmap.retained_rows, heatmap.total_rows
    ));
    summary.rows_retained = heatmap.retained_rows;
    summary.add_output(cli.heatmap.clone());

    if let Some(export_path) = &cli.export_correlation {
        let input_file = cli.input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            bounds,
            total_rows: heatmap.total_rows,
            retained_rows: heatmap.retained_rows,
        };
        export_correlation_json(&heatmap.matrix, &params, export_path)?;
        print_success(&format!(
            "Correlation matrix exported to {}",
            export_path.display()
        ));
        summary.add_output(export_path.clone());
    }
    let heatmap_elapsed = step_start.elapsed();
    summary.set_heatmap_time(heatmap_elapsed);
    print_step_time(heatmap_elapsed);

    // Display summary
    summary.display();

    // Final completion message
    print_completion();

    Ok(())
}
