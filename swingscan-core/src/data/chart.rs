//! Chart-API bar provider.
//!
//! Fetches daily OHLCV bars from the public v8 chart endpoint. The endpoint
//! has no official contract and changes shape without notice, so parsing is
//! defensive and every mismatch maps to `ResponseFormatChanged`. The raw
//! table is returned as-is; the normalizer cleans it up.

use std::time::Duration;

use polars::prelude::*;
use serde::Deserialize;

use super::provider::{BarProvider, DataError};

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// v8 chart API response envelope.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Chart-API provider with a per-request timeout.
pub struct ChartProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ChartProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.into())
    }

    /// Point the provider at a different host (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");
        Self { client, base_url }
    }

    fn chart_url(&self, symbol: &str, period: &str, interval: &str) -> String {
        format!(
            "{}/v8/finance/chart/{symbol}?range={period}&interval={interval}\
             &includeAdjustedClose=true",
            self.base_url
        )
    }

    /// Turn the parsed response into a raw bar table.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<DataFrame, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = match data.timestamp {
            Some(ts) if !ts.is_empty() => ts,
            // No bars for the range: an empty table, not an error.
            _ => return Ok(DataFrame::empty()),
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let n = timestamps.len();
        if [
            quote.open.len(),
            quote.high.len(),
            quote.low.len(),
            quote.close.len(),
            quote.volume.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(DataError::ResponseFormatChanged(
                "quote arrays disagree with timestamps".into(),
            ));
        }

        let ts_ms: Vec<i64> = timestamps.into_iter().map(|t| t * 1000).collect();
        let volume: Vec<Option<f64>> = quote
            .volume
            .into_iter()
            .map(|v| v.map(|v| v as f64))
            .collect();

        DataFrame::new(vec![
            Column::Series(Series::new("timestamp".into(), ts_ms).into()),
            Column::Series(Series::new("open".into(), quote.open).into()),
            Column::Series(Series::new("high".into(), quote.high).into()),
            Column::Series(Series::new("low".into(), quote.low).into()),
            Column::Series(Series::new("close".into(), quote.close).into()),
            Column::Series(Series::new("volume".into(), volume).into()),
        ])
        .map_err(|e| DataError::Other(e.to_string()))
    }
}

impl Default for ChartProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BarProvider for ChartProvider {
    fn name(&self) -> &str {
        "chart_api"
    }

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<DataFrame, DataError> {
        let url = self.chart_url(symbol, period, interval);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        if resp.status().as_u16() == 429 {
            return Err(DataError::RateLimited);
        }

        let parsed: ChartResponse = resp
            .json()
            .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))?;

        Self::parse_response(symbol, parsed)
    }
}
