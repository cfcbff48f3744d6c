//! Error types for medviz.
//!
//! Application-level plumbing (file IO, CLI) uses `anyhow` with context.
//! The variants here cover the failures that callers may want to match on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the loading, validation and rendering steps.
#[derive(Debug, Error)]
pub enum MedvizError {
    /// A column required by the examination schema is absent from the input.
    #[error("Required column '{column}' not found in dataset")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// A required column was loaded with a non-numeric type.
    #[error("Column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn {
        /// Name of the offending column
        column: String,
        /// Data type reported by the table engine
        dtype: String,
    },

    /// Outlier percentile bounds are out of order.
    #[error("Lower quantile {lower} must not exceed upper quantile {upper}")]
    InvalidQuantiles { lower: f64, upper: f64 },

    /// Output path has an extension no backend can write.
    #[error("Unsupported image format: '{extension}'. Supported formats: png, svg")]
    UnsupportedImageFormat { extension: String },

    /// Drawing or writing a figure failed.
    #[error("Failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl MedvizError {
    pub(crate) fn render(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        MedvizError::Render {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
