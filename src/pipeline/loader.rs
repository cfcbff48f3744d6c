//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::schema::{require_columns, validate_schema};

/// Build a lazy scan for a file (CSV or Parquet based on extension)
fn scan_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Load a dataset and check it against the examination schema.
///
/// Missing columns are reported from the file schema alone, before any rows
/// are collected. Returns the collected frame with its row count, column
/// count and estimated memory in MB.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<(DataFrame, usize, usize, f64)> {
    require_columns(&get_column_names(path)?)
        .with_context(|| format!("Dataset does not match the examination schema: {}", path.display()))?;

    let mut df = scan_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    validate_schema(&mut df)
        .with_context(|| format!("Dataset does not match the examination schema: {}", path.display()))?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    Ok((df, rows, cols, memory_mb))
}

/// Read only the column names of a dataset
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = scan_dataset(path, 100)?
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}
