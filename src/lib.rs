//! medviz: Medical Examination Visualizer
//!
//! A library for deriving clinical indicators from a medical examination
//! table and rendering a categorical count plot and a correlation heatmap.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod utils;

pub use error::MedvizError;
