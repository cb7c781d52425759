//! Data layer: provider trait, chart-API implementation, table normalizer.

pub mod chart;
pub mod normalize;
pub mod provider;

pub use chart::ChartProvider;
pub use normalize::normalize;
pub use provider::{BarProvider, DataError};
