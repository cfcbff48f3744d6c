//! Removal of physiologically invalid and extreme rows before correlation

use anyhow::Result;
use polars::prelude::*;

use super::schema::{f64_values, ExamColumn};
use crate::error::MedvizError;

/// Percentile bounds applied to `height` and `weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for QuantileBounds {
    fn default() -> Self {
        Self {
            lower: 0.025,
            upper: 0.975,
        }
    }
}

impl QuantileBounds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, MedvizError> {
        if lower > upper {
            return Err(MedvizError::InvalidQuantiles { lower, upper });
        }
        Ok(Self { lower, upper })
    }
}

/// Inclusive value range derived from a column's percentiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Quantile of the non-null values using linear interpolation between the
/// two closest ranks (position `q * (n - 1)` in sorted order).
///
/// Returns `None` when there are no non-null values.
pub fn quantile(values: &[Option<f64>], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;

    Some(sorted[below] + (sorted[above] - sorted[below]) * fraction)
}

fn percentile_range(values: &[Option<f64>], bounds: &QuantileBounds) -> Option<ValueRange> {
    Some(ValueRange {
        min: quantile(values, bounds.lower)?,
        max: quantile(values, bounds.upper)?,
    })
}

/// Outcome of the outlier filter.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub filtered: DataFrame,
    /// Height range computed on the unfiltered column.
    pub height_range: Option<ValueRange>,
    /// Weight range computed on the unfiltered column.
    pub weight_range: Option<ValueRange>,
}

/// Keep rows where diastolic pressure does not exceed systolic pressure and
/// both height and weight fall inside their percentile ranges.
///
/// All four bounds come from the full, unfiltered columns. A null in any of
/// the filter columns drops the row.
pub fn filter_outliers(df: &DataFrame, bounds: &QuantileBounds) -> Result<FilterOutcome> {
    let ap_hi = f64_values(df, ExamColumn::ApHi)?;
    let ap_lo = f64_values(df, ExamColumn::ApLo)?;
    let heights = f64_values(df, ExamColumn::Height)?;
    let weights = f64_values(df, ExamColumn::Weight)?;

    let height_range = percentile_range(&heights, bounds);
    let weight_range = percentile_range(&weights, bounds);

    let within = |range: Option<ValueRange>, value: Option<f64>| match (range, value) {
        (Some(range), Some(v)) => range.contains(v),
        _ => false,
    };

    let keep: BooleanChunked = (0..df.height())
        .map(|row| {
            let pressure_ok = match (ap_lo[row], ap_hi[row]) {
                (Some(lo), Some(hi)) => lo <= hi,
                _ => false,
            };
            pressure_ok && within(height_range, heights[row]) && within(weight_range, weights[row])
        })
        .collect();

    Ok(FilterOutcome {
        filtered: df.filter(&keep)?,
        height_range,
        weight_range,
    })
}
