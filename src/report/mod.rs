//! Report module - run summaries and data exports

pub mod correlation_export;
pub mod summary;

pub use correlation_export::*;
pub use summary::*;
