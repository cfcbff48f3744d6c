//! Pipeline module - loading, preprocessing and the computations behind both plots

pub mod categorical;
pub mod correlation;
pub mod loader;
pub mod mask;
pub mod outliers;
pub mod preprocess;
pub mod schema;

pub use categorical::*;
pub use correlation::*;
pub use loader::*;
pub use mask::*;
pub use outliers::*;
pub use preprocess::*;
pub use schema::*;
