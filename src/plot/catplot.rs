//! Faceted count plot of the indicator columns, split by `cardio`

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;

use super::{save_figure, Figure, FONT};
use crate::pipeline::{count_indicators, melt_indicators, CategoricalCounts, ExamColumn};

const FACET_WIDTH: u32 = 560;
const FACET_HEIGHT: u32 = 520;

/// Bar colours by indicator value, cycling when there are more levels.
const VALUE_PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

/// A single bar: how many rows have `variable == value` within a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub variable: ExamColumn,
    pub value: i32,
    pub total: usize,
}

/// One panel of the plot, holding the bars for a single `cardio` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatPlotFacet {
    pub cardio: i32,
    pub bars: Vec<Bar>,
}

impl CatPlotFacet {
    pub fn total(&self, variable: ExamColumn, value: i32) -> usize {
        self.bars
            .iter()
            .find(|b| b.variable == variable && b.value == value)
            .map_or(0, |b| b.total)
    }
}

/// Everything the categorical plot shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatPlotFigure {
    pub facets: Vec<CatPlotFacet>,
    /// Indicator values present, in hue order.
    pub value_levels: Vec<i32>,
    /// Number of long-form records the counts were built from.
    pub record_count: usize,
    pub y_label: String,
}

impl CatPlotFigure {
    /// Lay out the grouped counts as facets of bars, one bar per
    /// (variable, value) even when the count is zero.
    pub fn from_counts(counts: &CategoricalCounts, record_count: usize) -> Self {
        let value_levels = counts.value_levels();
        let facets = counts
            .cardio_levels()
            .into_iter()
            .map(|cardio| {
                let bars = ExamColumn::INDICATORS
                    .iter()
                    .flat_map(|&variable| {
                        value_levels.iter().map(move |&value| Bar {
                            variable,
                            value,
                            total: counts.get(cardio, variable, value),
                        })
                    })
                    .collect();
                CatPlotFacet { cardio, bars }
            })
            .collect();

        Self {
            facets,
            value_levels,
            record_count,
            y_label: "total".to_string(),
        }
    }

    fn y_max(&self) -> usize {
        self.facets
            .iter()
            .flat_map(|f| f.bars.iter().map(|b| b.total))
            .max()
            .unwrap_or(0)
    }

    fn value_color(&self, value: i32) -> RGBColor {
        let idx = self
            .value_levels
            .iter()
            .position(|&v| v == value)
            .unwrap_or(0);
        VALUE_PALETTE[idx % VALUE_PALETTE.len()]
    }
}

/// Label for an x position; bars for indicator `i` are centred on `i`.
fn indicator_label(x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    ExamColumn::INDICATORS
        .get(idx as usize)
        .map(|c| c.name().to_string())
        .unwrap_or_default()
}

impl Figure for CatPlotFigure {
    fn size(&self) -> (u32, u32) {
        let panels = self.facets.len().max(1) as u32;
        (FACET_WIDTH * panels, FACET_HEIGHT)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let panels = root.split_evenly((1, self.facets.len().max(1)));
        let y_top = (self.y_max() as f64 * 1.1).max(1.0);
        let n_vars = ExamColumn::INDICATORS.len();
        let n_levels = self.value_levels.len().max(1);
        let bar_width = 0.8 / n_levels as f64;

        for (idx, (facet, area)) in self.facets.iter().zip(panels.iter()).enumerate() {
            let mut chart = ChartBuilder::on(area)
                .caption(format!("cardio = {}", facet.cardio), (FONT, 20))
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(-0.5..(n_vars as f64 - 0.5), 0.0..y_top)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n_vars)
                .x_label_formatter(&|x| indicator_label(*x))
                .y_label_formatter(&|y| format!("{:.0}", y))
                .x_desc("variable")
                .y_desc(self.y_label.as_str())
                .draw()?;

            for (level_idx, &value) in self.value_levels.iter().enumerate() {
                let color = self.value_color(value);
                let offset = -0.4 + bar_width * level_idx as f64;
                let series = chart.draw_series(
                    facet
                        .bars
                        .iter()
                        .filter(|b| b.value == value)
                        .map(|b| {
                            let center = ExamColumn::INDICATORS
                                .iter()
                                .position(|&c| c == b.variable)
                                .unwrap_or(0) as f64;
                            let x0 = center + offset;
                            Rectangle::new(
                                [(x0, 0.0), (x0 + bar_width, b.total as f64)],
                                color.filled(),
                            )
                        }),
                )?;
                series
                    .label(format!("value = {}", value))
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
            }

            // one legend is enough for the whole figure
            if idx + 1 == self.facets.len() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
        }

        Ok(())
    }
}

/// Melt, count and render the indicator columns, writing the plot to
/// `output_path`.
///
/// The table must already be preprocessed so `overweight` exists.
pub fn draw_cat_plot(df: &DataFrame, output_path: &Path) -> Result<CatPlotFigure> {
    let records = melt_indicators(df)?;
    let counts = count_indicators(&records);
    let figure = CatPlotFigure::from_counts(&counts, records.len());

    save_figure(&figure, output_path)?;

    Ok(figure)
}
