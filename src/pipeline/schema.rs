//! Explicit schema for the medical examination table

use std::fmt;

use polars::prelude::*;

use crate::error::MedvizError;

/// Columns of the examination table that the pipelines read or write.
///
/// Referring to columns through this enum instead of string literals keeps
/// every pipeline in agreement on names and types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExamColumn {
    Height,
    Weight,
    ApHi,
    ApLo,
    Cholesterol,
    Gluc,
    Smoke,
    Alco,
    Active,
    Cardio,
    /// Derived during preprocessing, never read from the input file.
    Overweight,
}

impl ExamColumn {
    /// Columns every input file must provide.
    pub const REQUIRED: [ExamColumn; 10] = [
        ExamColumn::Height,
        ExamColumn::Weight,
        ExamColumn::ApHi,
        ExamColumn::ApLo,
        ExamColumn::Cholesterol,
        ExamColumn::Gluc,
        ExamColumn::Smoke,
        ExamColumn::Alco,
        ExamColumn::Active,
        ExamColumn::Cardio,
    ];

    /// Indicator columns shown in the categorical plot, in plotting order.
    pub const INDICATORS: [ExamColumn; 6] = [
        ExamColumn::Active,
        ExamColumn::Alco,
        ExamColumn::Cholesterol,
        ExamColumn::Gluc,
        ExamColumn::Overweight,
        ExamColumn::Smoke,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExamColumn::Height => "height",
            ExamColumn::Weight => "weight",
            ExamColumn::ApHi => "ap_hi",
            ExamColumn::ApLo => "ap_lo",
            ExamColumn::Cholesterol => "cholesterol",
            ExamColumn::Gluc => "gluc",
            ExamColumn::Smoke => "smoke",
            ExamColumn::Alco => "alco",
            ExamColumn::Active => "active",
            ExamColumn::Cardio => "cardio",
            ExamColumn::Overweight => "overweight",
        }
    }

    /// Storage type the column is normalized to after loading.
    ///
    /// Measurements are continuous; everything else is an ordinal or 0/1 flag.
    pub fn dtype(self) -> DataType {
        match self {
            ExamColumn::Height | ExamColumn::Weight | ExamColumn::ApHi | ExamColumn::ApLo => {
                DataType::Float64
            }
            ExamColumn::Overweight => DataType::Int8,
            _ => DataType::Int32,
        }
    }
}

impl fmt::Display for ExamColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fetch a column by its schema name, mapping absence to a typed error.
pub fn exam_column(df: &DataFrame, column: ExamColumn) -> Result<&Column, MedvizError> {
    df.column(column.name())
        .map_err(|_| MedvizError::MissingColumn {
            column: column.name().to_string(),
        })
}

/// Read a measurement column as `f64` values, keeping nulls.
pub fn f64_values(df: &DataFrame, column: ExamColumn) -> anyhow::Result<Vec<Option<f64>>> {
    let col = exam_column(df, column)?.cast(&DataType::Float64)?;
    Ok(col.f64()?.iter().collect())
}

/// Read an ordinal or flag column as `i32` values, keeping nulls.
pub fn i32_values(df: &DataFrame, column: ExamColumn) -> anyhow::Result<Vec<Option<i32>>> {
    let col = exam_column(df, column)?.cast(&DataType::Int32)?;
    Ok(col.i32()?.iter().collect())
}

/// Check a list of column names for every required column, before any
/// rows are read.
pub fn require_columns(names: &[String]) -> Result<(), MedvizError> {
    match ExamColumn::REQUIRED
        .iter()
        .find(|column| !names.iter().any(|name| name == column.name()))
    {
        Some(column) => Err(MedvizError::MissingColumn {
            column: column.name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Check that every required column is present and numeric, then cast each
/// one to its schema type in place.
pub fn validate_schema(df: &mut DataFrame) -> anyhow::Result<()> {
    for column in ExamColumn::REQUIRED {
        let existing = exam_column(df, column)?;
        let dtype = existing.dtype();
        if !dtype.is_primitive_numeric() {
            return Err(MedvizError::NonNumericColumn {
                column: column.name().to_string(),
                dtype: dtype.to_string(),
            }
            .into());
        }

        if *dtype != column.dtype() {
            let cast = existing.cast(&column.dtype())?;
            df.with_column(cast)?;
        }
    }

    Ok(())
}
