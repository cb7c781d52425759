//! Indicator engine — turns a canonical bar sequence into indicator rows.
//!
//! Pure: same input, same output; the row sequence has the same length and
//! ordering as the bar sequence. Every derived field is `Option<f64>` and an
//! undefined input propagates to every value computed from it.

use serde::{Deserialize, Serialize};

use super::atr::atr;
use super::ema::ema;
use super::macd::macd;
use super::rolling::{rolling_max_prior, rolling_mean_min_periods, rolling_min_prior};
use super::rsi::rsi;
use crate::config::ScanConfig;
use crate::domain::Bar;

pub const EMA_FAST_PERIOD: usize = 10;
pub const EMA_SLOW_PERIOD: usize = 30;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const ATR_PERIOD: usize = 14;
pub const VOL_MA_WINDOW: usize = 20;
/// The volume MA is allowed to warm up early, matching the feed's
/// `rolling(20, min_periods=5)`.
pub const VOL_MA_MIN_PERIODS: usize = 5;
pub const SWING_LOW_WINDOW: usize = 10;

/// A bar augmented with its derived indicator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub bar: Bar,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub atr14: Option<f64>,
    pub vol_ma20: Option<f64>,
    pub vol_ratio: Option<f64>,
    /// Rolling max of close over the breakout lookback, strictly before this bar.
    pub prior_n_high: Option<f64>,
    /// Rolling min of low over 10 bars, strictly before this bar.
    pub prior_swing_low: Option<f64>,
}

/// Compute the full indicator row sequence for one symbol.
pub fn compute_indicators(bars: &[Bar], config: &ScanConfig) -> Vec<IndicatorRow> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let lows: Vec<Option<f64>> = bars.iter().map(|b| b.low).collect();
    // Missing volume counts as zero, same as the upstream feed's fillna(0).
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume.unwrap_or(0.0)).collect();

    let ema_fast = ema(&closes, EMA_FAST_PERIOD);
    let ema_slow = ema(&closes, EMA_SLOW_PERIOD);
    let rsi14 = rsi(&closes, RSI_PERIOD);
    let macd_series = macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let atr14 = atr(bars, ATR_PERIOD);

    // A zero mean would divide away; treat it as undefined.
    let vol_ma20: Vec<Option<f64>> =
        rolling_mean_min_periods(&volumes, VOL_MA_WINDOW, VOL_MA_MIN_PERIODS)
            .into_iter()
            .map(|ma| ma.filter(|&m| m != 0.0))
            .collect();

    let prior_n_high = rolling_max_prior(&closes, config.breakout_lookback);
    let prior_swing_low = rolling_min_prior(&lows, SWING_LOW_WINDOW);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            bar: bar.clone(),
            ema_fast: ema_fast[i],
            ema_slow: ema_slow[i],
            rsi14: rsi14[i],
            macd: macd_series.line[i],
            macd_signal: macd_series.signal[i],
            macd_hist: macd_series.hist[i],
            atr14: atr14[i],
            vol_ma20: vol_ma20[i],
            vol_ratio: vol_ma20[i].map(|ma| volumes[i] / ma),
            prior_n_high: prior_n_high[i],
            prior_swing_low: prior_swing_low[i],
        })
        .collect()
}
