//! Integration tests for both plotting pipelines and the JSON export

use medviz::pipeline::{preprocess, QuantileBounds};
use medviz::plot::{draw_cat_plot, draw_heat_map};
use medviz::report::{export_correlation_json, ExportParams};
use medviz::MedvizError;
use polars::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_draw_cat_plot_writes_png() {
    let mut df = create_large_exam_dataframe(300, 1);
    preprocess(&mut df).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catplot.png");

    let figure = draw_cat_plot(&df, &path).unwrap();

    assert!(path.exists(), "catplot.png should be written");
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
    assert_eq!(figure.facets.len(), 2);
    assert_eq!(figure.record_count, 300 * 6);
}

#[test]
fn test_draw_heat_map_writes_svg() {
    let mut df = create_large_exam_dataframe(300, 2);
    preprocess(&mut df).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("heatmap.svg");

    let figure = draw_heat_map(&df, &path, &QuantileBounds::default()).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(figure.total_rows, 300);
    assert!(figure.retained_rows < figure.total_rows);
    let n = figure.matrix.len();
    assert_eq!(figure.annotations.len(), n * (n - 1) / 2);
}

#[test]
fn test_outputs_are_overwritten() {
    let mut df = create_exam_dataframe();
    preprocess(&mut df).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catplot.svg");
    std::fs::write(&path, "stale").unwrap();

    draw_cat_plot(&df, &path).unwrap();

    assert_ne!(std::fs::read_to_string(&path).unwrap(), "stale");
}

#[test]
fn test_unsupported_image_extension() {
    let mut df = create_exam_dataframe();
    preprocess(&mut df).unwrap();
    let temp_dir = TempDir::new().unwrap();

    let err = draw_cat_plot(&df, &temp_dir.path().join("catplot.jpg")).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MedvizError>(),
        Some(MedvizError::UnsupportedImageFormat { .. })
    ));
}

#[test]
fn test_unwritable_destination_propagates() {
    let mut df = create_exam_dataframe();
    preprocess(&mut df).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing_dir").join("heatmap.png");

    let result = draw_heat_map(&df, &path, &QuantileBounds::default());

    assert!(result.is_err(), "writing into a missing directory should fail");
}

#[test]
fn test_export_correlation_json_writes_null_for_nan() {
    let mut df = create_exam_dataframe();
    df.with_column(Column::new("sex".into(), vec![1i64; 10])).unwrap();
    preprocess(&mut df).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let bounds = QuantileBounds::new(0.0, 1.0).unwrap();

    let figure = draw_heat_map(&df, &temp_dir.path().join("heatmap.svg"), &bounds).unwrap();
    let json_path = temp_dir.path().join("corr.json");
    let params = ExportParams {
        input_file: "medical_examination.csv",
        bounds,
        total_rows: figure.total_rows,
        retained_rows: figure.retained_rows,
    };

    export_correlation_json(&figure.matrix, &params, &json_path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let columns = value["columns"].as_array().unwrap();
    assert_eq!(columns.len(), figure.matrix.len());
    assert_eq!(value["metadata"]["retained_rows"], 9);
    assert_eq!(value["metadata"]["input_file"], "medical_examination.csv");

    let sex = columns.iter().position(|c| c == "sex").unwrap();
    assert!(value["matrix"][sex][sex].is_null(), "constant column has no correlation");
    assert!(value["matrix"][0][sex].is_null());
    assert_eq!(value["matrix"][0][0], 1.0);
}
