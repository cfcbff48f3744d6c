//! Unit tests for indicator derivation

use medviz::pipeline::{add_overweight, binarize_indicators, preprocess, prevalence, ExamColumn};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_overweight_examples() {
    let mut df = create_exam_dataframe();

    add_overweight(&mut df).unwrap();

    let overweight = int_column(&df, "overweight");
    assert_eq!(overweight[0], Some(1), "165cm/70kg has BMI 25.71");
    assert_eq!(overweight[1], Some(0), "180cm/80kg has BMI 24.69");
    assert_eq!(overweight[2], Some(0), "BMI of exactly 25 is not overweight");
}

#[test]
fn test_overweight_matches_bmi_for_every_row() {
    let mut df = create_large_exam_dataframe(500, 7);

    preprocess(&mut df).unwrap();

    let heights = float_column(&df, "height");
    let weights = float_column(&df, "weight");
    let overweight = int_column(&df, "overweight");

    for row in 0..df.height() {
        let h = heights[row].unwrap() / 100.0;
        let bmi = weights[row].unwrap() / (h * h);
        let expected = if bmi > 25.0 { 1 } else { 0 };
        assert_eq!(overweight[row], Some(expected), "row {} with BMI {}", row, bmi);
    }
}

#[test]
fn test_binarize_maps_ordinal_scale() {
    let mut df = create_exam_dataframe();

    binarize_indicators(&mut df).unwrap();

    assert_eq!(
        int_column(&df, "cholesterol"),
        [1, 3, 3, 1, 1, 2, 3, 3, 1, 1]
            .iter()
            .map(|&v| Some(i32::from(v > 1)))
            .collect::<Vec<_>>()
    );
    assert_eq!(int_column(&df, "gluc")[7], Some(1), "gluc 3 is above normal");
    assert_eq!(int_column(&df, "gluc")[0], Some(0), "gluc 1 is normal");
}

#[test]
fn test_binarize_is_idempotent() {
    let mut once = create_exam_dataframe();
    binarize_indicators(&mut once).unwrap();

    let mut twice = create_exam_dataframe();
    binarize_indicators(&mut twice).unwrap();
    binarize_indicators(&mut twice).unwrap();

    assert_eq!(int_column(&once, "cholesterol"), int_column(&twice, "cholesterol"));
    assert_eq!(int_column(&once, "gluc"), int_column(&twice, "gluc"));
}

#[test]
fn test_int8_ordinals_are_binarized() {
    let mut df = df! {
        "height" => [170.0f64, 160.0],
        "weight" => [60.0f64, 80.0],
        "cholesterol" => [1i8, 3],
        "gluc" => [2i8, 1],
    }
    .unwrap();

    preprocess(&mut df).unwrap();

    assert_eq!(int_column(&df, "cholesterol"), vec![Some(0), Some(1)]);
    assert_eq!(int_column(&df, "gluc"), vec![Some(1), Some(0)]);

    // a second pass leaves the binarized columns alone
    preprocess(&mut df).unwrap();
    assert_eq!(int_column(&df, "cholesterol"), vec![Some(0), Some(1)]);
    assert_eq!(int_column(&df, "gluc"), vec![Some(1), Some(0)]);
}

#[test]
fn test_indicators_are_binary_after_preprocess() {
    let mut df = create_large_exam_dataframe(300, 11);

    preprocess(&mut df).unwrap();

    for name in ["overweight", "cholesterol", "gluc"] {
        for value in int_column(&df, name) {
            assert!(
                matches!(value, Some(0) | Some(1)),
                "{} should be 0 or 1, got {:?}",
                name,
                value
            );
        }
    }
}

#[test]
fn test_preprocess_keeps_other_columns() {
    let mut df = create_exam_dataframe();
    let width = df.width();

    preprocess(&mut df).unwrap();

    assert_eq!(df.width(), width + 1, "Only overweight is added");
    assert_has_columns(&df, &["id", "age", "ap_hi", "ap_lo", "smoke", "cardio"]);
    assert_eq!(int_column(&df, "age")[0], Some(18393));
}

#[test]
fn test_null_measurements_propagate() {
    let mut df = df! {
        "height" => [Some(170.0f64), None],
        "weight" => [Some(90.0f64), Some(60.0)],
        "cholesterol" => [Some(2i64), None],
        "gluc" => [Some(1i64), Some(1)],
    }
    .unwrap();

    preprocess(&mut df).unwrap();

    assert_eq!(int_column(&df, "overweight"), vec![Some(1), None]);
    assert_eq!(int_column(&df, "cholesterol"), vec![Some(1), None]);
}

#[test]
fn test_prevalence() {
    let mut df = create_exam_dataframe();
    preprocess(&mut df).unwrap();

    // cholesterol > 1 in rows 1, 2, 5, 6, 7
    let share = prevalence(&df, ExamColumn::Cholesterol).unwrap();
    assert!((share - 0.5).abs() < 1e-12, "got {}", share);
}
