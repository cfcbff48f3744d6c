//! Derived clinical indicators

use anyhow::Result;
use polars::prelude::*;

use super::schema::{exam_column, f64_values, i32_values, ExamColumn};

/// BMI above which a patient counts as overweight.
pub const OVERWEIGHT_BMI: f64 = 25.0;

/// Storage type of derived 0/1 indicator columns.
pub const INDICATOR_DTYPE: DataType = DataType::Int8;

/// Body mass index from height in centimetres and weight in kilograms.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// 1 when the BMI is strictly above the overweight cutoff, else 0.
pub fn overweight_flag(height_cm: f64, weight_kg: f64) -> i8 {
    i8::from(bmi(height_cm, weight_kg) > OVERWEIGHT_BMI)
}

/// Collapse an ordinal 1-3 scale into normal (0) vs above normal (1).
pub fn binarize(value: i32) -> i8 {
    i8::from(value > 1)
}

/// Attach the `overweight` column computed from `height` and `weight`.
///
/// A null height or weight leaves the flag null.
pub fn add_overweight(df: &mut DataFrame) -> Result<()> {
    let heights = f64_values(df, ExamColumn::Height)?;
    let weights = f64_values(df, ExamColumn::Weight)?;

    let flags: Vec<Option<i8>> = heights
        .iter()
        .zip(weights.iter())
        .map(|(h, w)| match (h, w) {
            (Some(h), Some(w)) => Some(overweight_flag(*h, *w)),
            _ => None,
        })
        .collect();

    df.with_column(Column::new(ExamColumn::Overweight.name().into(), flags))?;
    Ok(())
}

/// Whether a column already holds binarized indicators: stored as
/// [`INDICATOR_DTYPE`] with every non-null value in {0, 1}.
fn is_binarized(dtype: &DataType, values: &[Option<i32>]) -> bool {
    *dtype == INDICATOR_DTYPE && values.iter().flatten().all(|&v| v == 0 || v == 1)
}

/// Rewrite `cholesterol` and `gluc` in place as 0/1 indicators.
///
/// Applying this twice gives the same table as applying it once.
pub fn binarize_indicators(df: &mut DataFrame) -> Result<()> {
    for column in [ExamColumn::Cholesterol, ExamColumn::Gluc] {
        let dtype = exam_column(df, column)?.dtype().clone();
        let values = i32_values(df, column)?;
        if is_binarized(&dtype, &values) {
            continue;
        }
        let binarized: Vec<Option<i8>> = values.into_iter().map(|v| v.map(binarize)).collect();
        df.with_column(Column::new(column.name().into(), binarized))?;
    }
    Ok(())
}

/// Run every preprocessing step on the shared table.
pub fn preprocess(df: &mut DataFrame) -> Result<()> {
    add_overweight(df)?;
    binarize_indicators(df)?;
    Ok(())
}

/// Share of non-null rows where an indicator column equals 1.
pub fn prevalence(df: &DataFrame, column: ExamColumn) -> Result<f64> {
    let values = i32_values(df, column)?;
    let (positive, total) = values
        .iter()
        .flatten()
        .fold((0usize, 0usize), |(p, t), &v| (p + usize::from(v == 1), t + 1));

    if total == 0 {
        return Ok(0.0);
    }
    Ok(positive as f64 / total as f64)
}
