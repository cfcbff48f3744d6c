//! Pearson correlation matrix over the numeric columns of a table

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;

/// Square, symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Mat<f64>,
}

impl CorrelationMatrix {
    /// Column names, in the order of the matrix rows and columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (equal to the number of columns).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[(row, col)]
    }

    /// Coefficient for two named columns, if both are present.
    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.get(i, j))
    }

    /// Row-major copy of the coefficients.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.len())
            .map(|i| (0..self.len()).map(|j| self.get(i, j)).collect())
            .collect()
    }
}

/// Compute Pearson correlation with Welford's single-pass algorithm, using
/// only rows where both values are present.
///
/// Returns NaN when fewer than two complete pairs exist or either side has
/// zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (a, b) in x.iter().zip(y.iter()) {
        if let (Some(a), Some(b)) = (a, b) {
            n += 1.0;
            let dx = a - mean_x;
            let dy = b - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (a - mean_x);
            var_y += dy * (b - mean_y);
            cov_xy += dx * (b - mean_y);
        }
    }

    if n < 2.0 || var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov_xy / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Correlation of a column with itself: 1.0 unless it is degenerate.
fn self_correlation(x: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = x.iter().flatten().copied().collect();
    match present.first() {
        Some(first) if present.len() >= 2 && present.iter().any(|v| v != first) => 1.0,
        _ => f64::NAN,
    }
}

/// Names of all primitive-numeric columns, in table order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}

/// Pairwise Pearson correlation over every numeric column of `df`.
///
/// Pairs are computed in parallel; the upper triangle is mirrored so the
/// result is exactly symmetric.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let columns = numeric_columns(df);

    let float_columns: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| -> Result<Vec<Option<f64>>> {
            let col = df.column(name)?.cast(&DataType::Float64)?;
            Ok(col.f64()?.iter().collect())
        })
        .collect::<Result<_>>()?;

    let n = columns.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let coefficients: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| (i, j, pearson(&float_columns[i], &float_columns[j])))
        .collect();

    let mut values = Mat::<f64>::zeros(n, n);
    for (i, column) in float_columns.iter().enumerate() {
        values[(i, i)] = self_correlation(column);
    }
    for (i, j, r) in coefficients {
        values[(i, j)] = r;
        values[(j, i)] = r;
    }

    Ok(CorrelationMatrix { columns, values })
}
