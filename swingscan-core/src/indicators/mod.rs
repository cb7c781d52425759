//! Indicator kernels and the per-symbol indicator engine.
//!
//! Kernels are plain functions over slices returning `Vec<Option<f64>>`:
//! `None` marks "not enough history" or "an input was missing", and a `None`
//! never compares equal to any threshold downstream.

pub mod atr;
pub mod ema;
pub mod engine;
pub mod macd;
pub mod rolling;
pub mod rsi;

pub use atr::{atr, true_range};
pub use ema::{ema, ema_of_series};
pub use engine::{compute_indicators, IndicatorRow};
pub use macd::{macd, MacdSeries};
pub use rsi::rsi;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLCV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                ts: i as i64 * 86_400_000,
                open: Some(open),
                high: Some(open.max(close) + 1.0),
                low: Some(open.min(close) - 1.0),
                close,
                volume: Some(1000.0),
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
