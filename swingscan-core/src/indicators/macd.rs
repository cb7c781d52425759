//! MACD — moving-average convergence/divergence.
//!
//! Line: EMA(fast) − EMA(slow) of close.
//! Signal: EMA(signal_period) of the line.
//! Histogram: line − signal.

use super::ema::{ema, ema_of_series};

/// The three MACD series, index-aligned with the input closes.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub hist: Vec<Option<f64>>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);

    let line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = ema_of_series(&line, signal_period);

    let hist: Vec<Option<f64>> = line
        .iter()
        .zip(&signal)
        .map(|(l, s)| match (l, s) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        })
        .collect();

    MacdSeries { line, signal, hist }
}
