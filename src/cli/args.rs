//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::error::MedvizError;
use crate::pipeline::QuantileBounds;

/// medviz - Visualize medical examination data as a count plot and a correlation heatmap
#[derive(Parser, Debug)]
#[command(name = "medviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV with a header row, or Parquet)
    #[arg(short, long, default_value = "medical_examination.csv")]
    pub input: PathBuf,

    /// Output path for the categorical count plot (PNG or SVG, determined by extension)
    #[arg(long, default_value = "catplot.png")]
    pub catplot: PathBuf,

    /// Output path for the correlation heatmap (PNG or SVG, determined by extension)
    #[arg(long, default_value = "heatmap.png")]
    pub heatmap: PathBuf,

    /// Lower percentile for the height/weight outlier filter
    #[arg(long, default_value = "0.025", value_parser = validate_quantile)]
    pub lower_quantile: f64,

    /// Upper percentile for the height/weight outlier filter
    #[arg(long, default_value = "0.975", value_parser = validate_quantile)]
    pub upper_quantile: f64,

    /// Optional path to write the correlation matrix as JSON
    #[arg(long)]
    pub export_correlation: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Percentile bounds for the heatmap filter, checked for ordering.
    pub fn quantile_bounds(&self) -> Result<QuantileBounds, MedvizError> {
        QuantileBounds::new(self.lower_quantile, self.upper_quantile)
    }
}

/// Validator for quantile parameters
fn validate_quantile(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("quantile must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}
