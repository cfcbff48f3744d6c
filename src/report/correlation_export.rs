//! Correlation matrix export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CorrelationMatrix, QuantileBounds};

/// Metadata about the run that produced the matrix
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// medviz version
    pub medviz_version: String,
    /// Input file path
    pub input_file: String,
    /// Lower percentile used for the height/weight filter
    pub lower_quantile: f64,
    /// Upper percentile used for the height/weight filter
    pub upper_quantile: f64,
    /// Rows in the table before filtering
    pub total_rows: usize,
    /// Rows the matrix was computed from
    pub retained_rows: usize,
}

/// Complete correlation export with metadata
#[derive(Serialize)]
pub struct CorrelationExport {
    pub metadata: ExportMetadata,
    /// Column names, in matrix order
    pub columns: Vec<String>,
    /// Row-major coefficients; undefined (NaN) entries are `null`
    pub matrix: Vec<Vec<Option<f64>>>,
}

/// Parameters for a correlation export
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub bounds: QuantileBounds,
    pub total_rows: usize,
    pub retained_rows: usize,
}

impl CorrelationExport {
    pub fn new(matrix: &CorrelationMatrix, params: &ExportParams<'_>) -> Self {
        let rows = matrix
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(|v| (!v.is_nan()).then_some(v)).collect())
            .collect();

        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                medviz_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file.to_string(),
                lower_quantile: params.bounds.lower,
                upper_quantile: params.bounds.upper,
                total_rows: params.total_rows,
                retained_rows: params.retained_rows,
            },
            columns: matrix.columns().to_vec(),
            matrix: rows,
        }
    }
}

/// Export the correlation matrix to a JSON file
pub fn export_correlation_json(
    matrix: &CorrelationMatrix,
    params: &ExportParams<'_>,
    output_path: &Path,
) -> Result<()> {
    let export = CorrelationExport::new(matrix, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize correlation matrix to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write correlation matrix to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
