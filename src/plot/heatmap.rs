//! Annotated lower-triangle correlation heatmap

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use polars::prelude::DataFrame;

use super::{save_figure, Figure, FONT};
use crate::pipeline::{
    correlation_matrix, filter_outliers, upper_triangle_mask, CorrelationMatrix, FilterOutcome,
    QuantileBounds, TriangleMask, ValueRange,
};

/// Side length of the square matrix area, label areas included.
const MATRIX_SIDE: u32 = 820;
const COLORBAR_WIDTH: u32 = 110;
const LABEL_AREA: u32 = 110;

/// A visible cell and the text written on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub label: String,
}

/// Everything the heatmap shows, plus the filter statistics behind it.
#[derive(Debug, Clone)]
pub struct HeatmapFigure {
    pub matrix: CorrelationMatrix,
    pub mask: TriangleMask,
    pub annotations: Vec<Annotation>,
    /// Rows left after outlier filtering.
    pub retained_rows: usize,
    /// Rows in the table before filtering.
    pub total_rows: usize,
    pub height_range: Option<ValueRange>,
    pub weight_range: Option<ValueRange>,
}

/// Format a coefficient the way it is printed on the heatmap.
pub fn format_coefficient(value: f64) -> String {
    format!("{:.1}", value)
}

impl HeatmapFigure {
    /// Mask the upper triangle of a matrix computed from `outcome.filtered`
    /// and annotate every visible cell.
    ///
    /// `total_rows` is the row count before filtering. NaN coefficients are
    /// left unannotated.
    pub fn new(matrix: CorrelationMatrix, outcome: &FilterOutcome, total_rows: usize) -> Self {
        let mask = upper_triangle_mask(matrix.len());
        let annotations = mask
            .visible_cells()
            .map(|(row, col)| (row, col, matrix.get(row, col)))
            .filter(|(_, _, value)| !value.is_nan())
            .map(|(row, col, value)| Annotation {
                row,
                col,
                value,
                label: format_coefficient(value),
            })
            .collect();

        Self {
            matrix,
            mask,
            annotations,
            retained_rows: outcome.filtered.height(),
            total_rows,
            height_range: outcome.height_range,
            weight_range: outcome.weight_range,
        }
    }
}

/// Diverging blue-white-red scale over [-1, 1].
pub fn diverging_color(value: f64) -> RGBColor {
    const NEGATIVE: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MIDDLE: (f64, f64, f64) = (242.0, 242.0, 242.0);
    const POSITIVE: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (MIDDLE, NEGATIVE, -v)
    } else {
        (MIDDLE, POSITIVE, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

fn text_color(value: f64) -> RGBColor {
    if value.abs() > 0.6 {
        WHITE
    } else {
        BLACK
    }
}

impl Figure for HeatmapFigure {
    fn size(&self) -> (u32, u32) {
        (MATRIX_SIDE + COLORBAR_WIDTH, MATRIX_SIDE)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        if self.matrix.is_empty() {
            return Ok(());
        }
        let (matrix_area, colorbar_area) = root.split_horizontally(MATRIX_SIDE);
        let n = self.matrix.len();
        let names = self.matrix.columns();
        let upper = n as f64 - 0.5;

        // row 0 is drawn at the top
        let y_of = |row: usize| (n - 1 - row) as f64;
        let x_label = |x: &f64| label_at(names, *x, |idx| idx);
        let y_label = |y: &f64| label_at(names, *y, |idx| n.saturating_sub(1 + idx));

        let mut chart = ChartBuilder::on(&matrix_area)
            .margin(10)
            .x_label_area_size(LABEL_AREA)
            .y_label_area_size(LABEL_AREA)
            .build_cartesian_2d(-0.5..upper, -0.5..upper)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n.max(1))
            .y_labels(n.max(1))
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .x_label_style((FONT, 13).into_font().transform(FontTransform::Rotate90))
            .y_label_style((FONT, 13))
            .draw()?;

        chart.draw_series(self.annotations.iter().map(|a| {
            let y = y_of(a.row);
            let x = a.col as f64;
            Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                diverging_color(a.value).filled(),
            )
        }))?;

        chart.draw_series(self.annotations.iter().map(|a| {
            let style = (FONT, 12)
                .into_font()
                .color(&text_color(a.value))
                .pos(Pos::new(HPos::Center, VPos::Center));
            Text::new(a.label.clone(), (a.col as f64, y_of(a.row)), style)
        }))?;

        draw_colorbar(&colorbar_area)
    }
}

/// Name of the matrix column whose cell is centred on `pos`.
fn label_at(names: &[String], pos: f64, index_of: impl Fn(usize) -> usize) -> String {
    let idx = pos.round();
    if (pos - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names
        .get(index_of(idx as usize))
        .cloned()
        .unwrap_or_default()
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    const STEPS: usize = 100;

    let mut chart = ChartBuilder::on(area)
        .margin_top(10)
        .margin_bottom(LABEL_AREA + 10)
        .margin_right(10)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, -1.0..1.0)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|y| format!("{:.1}", y))
        .draw()?;

    let step = 2.0 / STEPS as f64;
    chart.draw_series((0..STEPS).map(|i| {
        let low = -1.0 + step * i as f64;
        Rectangle::new(
            [(0.0, low), (1.0, low + step)],
            diverging_color(low + step / 2.0).filled(),
        )
    }))?;

    Ok(())
}

/// Filter outliers, correlate the remaining rows and render the lower
/// triangle of the matrix to `output_path`.
pub fn draw_heat_map(
    df: &DataFrame,
    output_path: &Path,
    bounds: &QuantileBounds,
) -> Result<HeatmapFigure> {
    let outcome = filter_outliers(df, bounds)?;
    let matrix = correlation_matrix(&outcome.filtered)?;
    let figure = HeatmapFigure::new(matrix, &outcome, df.height());

    save_figure(&figure, output_path)?;

    Ok(figure)
}
