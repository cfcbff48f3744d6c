//! Figure models and their rendering through plotters
//!
//! Each pipeline produces a plain figure model first (what will be drawn),
//! then hands it to [`save_figure`], which picks a backend from the output
//! extension and draws it. The model is returned to callers so the drawn
//! content can be inspected without decoding images.

pub mod catplot;
pub mod heatmap;

pub use catplot::*;
pub use heatmap::*;

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::MedvizError;

/// Font family used for every label.
pub(crate) const FONT: &str = "sans-serif";

/// Image formats the renderer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Pick a format from the path extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, MedvizError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(MedvizError::UnsupportedImageFormat { extension }),
        }
    }
}

/// Something that can be drawn onto a plotters drawing area.
pub trait Figure {
    /// Canvas size in pixels.
    fn size(&self) -> (u32, u32);

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>;
}

/// Render a figure to `path`, overwriting any existing file.
pub fn save_figure<F: Figure>(figure: &F, path: &Path) -> Result<(), MedvizError> {
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, figure.size()).into_drawing_area();
            draw_and_present(figure, &root, path)
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, figure.size()).into_drawing_area();
            draw_and_present(figure, &root, path)
        }
    }
}

fn draw_and_present<F: Figure, DB: DrawingBackend>(
    figure: &F,
    root: &DrawingArea<DB, Shift>,
    path: &Path,
) -> Result<(), MedvizError> {
    root.fill(&WHITE)
        .map_err(|e| MedvizError::render(path, e))?;
    figure
        .draw(root)
        .map_err(|e| MedvizError::render(path, e))?;
    root.present().map_err(|e| MedvizError::render(path, e))
}
