//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small examination table with known characteristics
///
/// - row 0: height 165, weight 70 -> BMI 25.71 (overweight)
/// - row 1: height 180, weight 80 -> BMI 24.69 (not overweight)
/// - row 2: height 100, weight 25 -> BMI exactly 25 (not overweight)
/// - row 3: ap_lo 90 > ap_hi 80 (invalid pressure)
/// - cholesterol/gluc cover every level of the 1-3 scale
pub fn create_exam_dataframe() -> DataFrame {
    df! {
        "id" => [0i64, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        "age" => [18393i64, 20228, 18857, 17623, 17474, 21914, 22113, 22584, 17668, 19834],
        "height" => [165i64, 180, 100, 169, 156, 151, 157, 178, 158, 164],
        "weight" => [70.0f64, 80.0, 25.0, 82.0, 56.0, 67.0, 93.0, 95.0, 71.0, 68.0],
        "ap_hi" => [110i64, 140, 130, 80, 100, 120, 130, 130, 110, 110],
        "ap_lo" => [80i64, 90, 70, 90, 60, 80, 80, 90, 70, 60],
        "cholesterol" => [1i64, 3, 3, 1, 1, 2, 3, 3, 1, 1],
        "gluc" => [1i64, 1, 1, 1, 1, 2, 1, 3, 1, 1],
        "smoke" => [0i64, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        "alco" => [0i64, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        "active" => [1i64, 1, 0, 1, 0, 0, 1, 1, 1, 0],
        "cardio" => [0i64, 1, 1, 1, 0, 0, 0, 1, 0, 0],
    }
    .unwrap()
}

/// Create a larger synthetic examination table with plausible value ranges
pub fn create_large_exam_dataframe(rows: usize, seed: u64) -> DataFrame {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);

    let height: Vec<f64> = (0..rows).map(|_| rng.gen_range(140.0..200.0)).collect();
    let weight: Vec<f64> = height
        .iter()
        .map(|h| (h - 100.0) + rng.gen_range(-20.0..30.0))
        .collect();
    let ap_hi: Vec<i64> = (0..rows).map(|_| rng.gen_range(90..180)).collect();
    // roughly 10% of rows get a diastolic reading above systolic
    let ap_lo: Vec<i64> = ap_hi
        .iter()
        .map(|&hi| {
            if rng.gen_bool(0.1) {
                hi + rng.gen_range(1..20)
            } else {
                hi - rng.gen_range(20..50)
            }
        })
        .collect();
    let ordinal = |rng: &mut StdRng| -> Vec<i64> { (0..rows).map(|_| rng.gen_range(1..=3)).collect() };
    let flag = |rng: &mut StdRng| -> Vec<i64> { (0..rows).map(|_| rng.gen_range(0..=1)).collect() };
    let cholesterol = ordinal(&mut rng);
    let gluc = ordinal(&mut rng);
    let smoke = flag(&mut rng);
    let alco = flag(&mut rng);
    let active = flag(&mut rng);
    let cardio = flag(&mut rng);

    df! {
        "height" => height,
        "weight" => weight,
        "ap_hi" => ap_hi,
        "ap_lo" => ap_lo,
        "cholesterol" => cholesterol,
        "gluc" => gluc,
        "smoke" => smoke,
        "alco" => alco,
        "active" => active,
        "cardio" => cardio,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("medical_examination.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("medical_examination.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Read a column as i32 values for assertions
pub fn int_column(df: &DataFrame, name: &str) -> Vec<Option<i32>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int32)
        .unwrap()
        .i32()
        .unwrap()
        .iter()
        .collect()
}

/// Read a column as f64 values for assertions
pub fn float_column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .collect()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
