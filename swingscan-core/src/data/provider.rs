//! Bar provider trait and structured error types.
//!
//! The BarProvider trait abstracts over data sources (chart API, CSV import,
//! test fixtures) so implementations can be swapped and mocked. Providers
//! return the raw table exactly as the source shaped it; cleaning is the
//! normalizer's job.

use polars::prelude::DataFrame;
use thiserror::Error;

/// Fetch-level errors. Always isolated to one symbol by the batch layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for bar providers.
///
/// `fetch` is synchronous; implementations own their timeout. `period` and
/// `interval` use the provider's own vocabulary ("1y", "1d", ...).
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch a raw daily-bar table for one symbol. An empty frame means the
    /// source had nothing; only transport-level failures are errors.
    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<DataFrame, DataError>;
}
