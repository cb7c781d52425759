//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! TR is undefined at index 0 (no previous close) and wherever high or low
//! is missing. ATR is a simple rolling mean of TR over `period` bars,
//! requiring a full window.

use super::rolling::rolling_mean_full;
use crate::domain::Bar;

/// True Range series, index-aligned with the bars.
pub fn true_range(bars: &[Bar]) -> Vec<Option<f64>> {
    let n = bars.len();
    let mut tr = vec![None; n];

    for i in 1..n {
        let prev_close = bars[i - 1].close;
        if let (Some(h), Some(l)) = (bars[i].high, bars[i].low) {
            tr[i] = Some((h - l).max((h - prev_close).abs()).max((l - prev_close).abs()));
        }
    }

    tr
}

pub fn atr(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    rolling_mean_full(&true_range(bars), period)
}
