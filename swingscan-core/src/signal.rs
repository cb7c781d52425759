//! Signal evaluator — a pure decision function over the latest two rows.
//!
//! BUY fires when any of four independent modes is satisfied; the modes are
//! OR-ed with no priority, so a row satisfying several is still just BUY.
//! WATCH is consulted only when no BUY mode fired, so the two are mutually
//! exclusive by construction. An undefined indicator value never satisfies a
//! threshold comparison.

use std::collections::BTreeSet;

use crate::config::ScanConfig;
use crate::domain::{FailReason, SignalKind};
use crate::indicators::IndicatorRow;

/// Close must sit within 2% below the prior high for the pullback mode.
const PULLBACK_TOLERANCE: f64 = 0.02;
/// WATCH widens the proximity band to 3%.
const WATCH_TOLERANCE: f64 = 0.03;

/// Outcome of evaluating one symbol's latest two rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub kind: SignalKind,
    /// Failure categories; non-empty only for `None` with diagnostics on.
    pub reasons: BTreeSet<FailReason>,
}

/// Threshold gate that an undefined value can never pass.
fn at_least(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v >= threshold)
}

fn trend_up(row: &IndicatorRow) -> bool {
    matches!((row.ema_fast, row.ema_slow), (Some(f), Some(s)) if f > s)
}

/// Close strictly below the prior N-bar high, within `tolerance` of it.
fn near_prior_high(row: &IndicatorRow, tolerance: f64) -> bool {
    match row.prior_n_high {
        Some(high) if high > 0.0 => {
            let gap = (high - row.bar.close) / high;
            gap > 0.0 && gap <= tolerance
        }
        _ => false,
    }
}

/// Classify today's row given yesterday's. Stateless and deterministic.
pub fn evaluate(today: &IndicatorRow, yesterday: &IndicatorRow, config: &ScanConfig) -> Evaluation {
    let (fired, reasons) = buy_signal(today, yesterday, config);
    if fired {
        return Evaluation {
            kind: SignalKind::Buy,
            reasons: BTreeSet::new(),
        };
    }

    if watch_signal(today, config) {
        return Evaluation {
            kind: SignalKind::Watch,
            reasons: BTreeSet::new(),
        };
    }

    Evaluation {
        kind: SignalKind::None,
        reasons: if config.diagnostics {
            reasons
        } else {
            BTreeSet::new()
        },
    }
}

/// The four BUY modes, plus the failure-category set when none fires.
fn buy_signal(
    today: &IndicatorRow,
    yesterday: &IndicatorRow,
    config: &ScanConfig,
) -> (bool, BTreeSet<FailReason>) {
    let close = today.bar.close;
    let uptrend = trend_up(today);

    let macd_ok = at_least(today.macd_hist, 0.0);
    let macd_rising =
        matches!((today.macd_hist, yesterday.macd_hist), (Some(h), Some(p)) if h > p);

    let vol_ok = at_least(today.vol_ratio, config.vol_mult);
    let vol_ok_09 = at_least(today.vol_ratio, 0.9);
    // Historical relaxation for the breakout mode, kept verbatim:
    // 0.9 floored against 90% of the configured multiplier.
    let vol_ok_relaxed = at_least(today.vol_ratio, 0.9f64.max(config.vol_mult * 0.9));

    // At the floor and rising; "rising" is vacuously true when yesterday's
    // RSI is undefined.
    let rsi_ok = match today.rsi14 {
        Some(r) => r >= config.rsi_min && yesterday.rsi14.map_or(true, |p| r > p),
        None => false,
    };
    let rsi_cross = at_least(today.rsi14, 43.0f64.max(config.rsi_min - 5.0));
    let rsi_pullback = at_least(today.rsi14, 45.0f64.max(config.rsi_min - 3.0));
    let rsi_thrust = at_least(today.rsi14, 50.0f64.max(config.rsi_min));

    let breakout = matches!(today.prior_n_high, Some(h) if close > h);
    let near_high = near_prior_high(today, PULLBACK_TOLERANCE);

    // (A) Breakout on volume.
    let mode_a = uptrend && breakout && (vol_ok || vol_ok_relaxed) && rsi_ok && macd_ok;

    // (B) Fast EMA crossed above slow between yesterday and today.
    let crossed = matches!((yesterday.ema_fast, yesterday.ema_slow), (Some(f), Some(s)) if f <= s)
        && uptrend;
    let mode_b = crossed && vol_ok_09 && rsi_cross;

    // (C) Trend pullback parked just under the prior high.
    let above_base = uptrend && matches!(today.ema_slow, Some(s) if close > s);
    let mode_c = above_base && macd_ok && vol_ok_09 && rsi_pullback && near_high;

    // (D) Thrust continuation, no breakout yet.
    let ema_gap_ok = uptrend && matches!(today.ema_slow, Some(s) if close / s >= 1.01);
    let mode_d = ema_gap_ok && macd_rising && rsi_thrust && vol_ok_09;

    let fired = mode_a || mode_b || mode_c || mode_d;

    let mut reasons = BTreeSet::new();
    if !fired {
        if !uptrend {
            reasons.insert(FailReason::Trend);
        }
        if !(breakout || near_high || ema_gap_ok) {
            reasons.insert(FailReason::Setup);
        }
        if !(vol_ok || vol_ok_relaxed || vol_ok_09) {
            reasons.insert(FailReason::Volume);
        }
        if !(rsi_ok || rsi_cross || rsi_thrust) {
            reasons.insert(FailReason::Rsi);
        }
        if !(macd_ok || macd_rising) {
            reasons.insert(FailReason::Macd);
        }
    }

    (fired, reasons)
}

/// WATCH — near-breakout, widened gates. Only reached when BUY did not fire.
fn watch_signal(today: &IndicatorRow, config: &ScanConfig) -> bool {
    trend_up(today)
        && near_prior_high(today, WATCH_TOLERANCE)
        && at_least(today.vol_ratio, 0.8)
        && at_least(today.rsi14, (config.rsi_min - 7.0).max(40.0))
        && at_least(today.macd_hist, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;

    /// Bare row: close defined, everything derived undefined.
    fn bare_row(close: f64) -> IndicatorRow {
        IndicatorRow {
            bar: Bar {
                ts: 0,
                open: Some(close),
                high: Some(close + 1.0),
                low: Some(close - 1.0),
                close,
                volume: Some(1000.0),
            },
            ema_fast: None,
            ema_slow: None,
            rsi14: None,
            macd: None,
            macd_signal: None,
            macd_hist: None,
            atr14: None,
            vol_ma20: None,
            vol_ratio: None,
            prior_n_high: None,
            prior_swing_low: None,
        }
    }

    /// A row that fires mode A under the given config.
    fn breakout_row(close: f64) -> IndicatorRow {
        let mut row = bare_row(close);
        row.ema_fast = Some(close * 0.97);
        row.ema_slow = Some(close * 0.92);
        row.rsi14 = Some(65.0);
        row.macd_hist = Some(0.2);
        row.vol_ratio = Some(1.6);
        row.prior_n_high = Some(close * 0.95);
        row.atr14 = Some(2.0);
        row.prior_swing_low = Some(close * 0.9);
        row
    }

    fn yesterday_for(row: &IndicatorRow) -> IndicatorRow {
        let mut yday = row.clone();
        yday.rsi14 = row.rsi14.map(|r| r - 5.0);
        yday.macd_hist = row.macd_hist.map(|h| h - 0.05);
        yday
    }

    fn config(vol_mult: f64, rsi_min: f64) -> ScanConfig {
        ScanConfig {
            vol_mult,
            rsi_min,
            diagnostics: true,
            ..ScanConfig::default()
        }
    }

    #[test]
    fn mode_a_breakout_fires_buy() {
        // close=110, prior high=100, uptrend, RSI 65 rising over floor 50,
        // vol_ratio 1.6 vs multiplier 1.5, MACD hist 0.2.
        let mut today = breakout_row(110.0);
        today.prior_n_high = Some(100.0);
        let mut yday = yesterday_for(&today);
        // Keep D quiet: histogram flat.
        yday.macd_hist = today.macd_hist;
        let eval = evaluate(&today, &yday, &config(1.5, 50.0));
        assert_eq!(eval.kind, SignalKind::Buy);
        assert!(eval.reasons.is_empty());
    }

    #[test]
    fn mode_a_volume_relaxation_is_literal() {
        // multiplier 1.5 → relaxed gate max(0.9, 1.35) = 1.35.
        let mut today = breakout_row(110.0);
        today.vol_ratio = Some(1.4);
        let mut yday = yesterday_for(&today);
        yday.macd_hist = today.macd_hist;
        // Keep the thrust mode quiet so only A can decide.
        today.ema_slow = Some(today.bar.close / 1.005);
        today.ema_fast = Some(today.bar.close / 1.002);
        assert_eq!(evaluate(&today, &yday, &config(1.5, 50.0)).kind, SignalKind::Buy);

        today.vol_ratio = Some(1.3); // below 1.35: breakout no longer qualifies
        let eval = evaluate(&today, &yday, &config(1.5, 50.0));
        assert_ne!(eval.kind, SignalKind::Buy);
    }

    #[test]
    fn mode_a_requires_rising_rsi() {
        let mut today = breakout_row(110.0);
        today.prior_n_high = Some(100.0);
        // Only A is in play: kill the gap thrust and the cross.
        today.ema_slow = Some(today.bar.close / 1.005);
        today.ema_fast = Some(today.bar.close / 1.002);
        let mut yday = today.clone();
        yday.rsi14 = Some(70.0); // RSI falling
        let eval = evaluate(&today, &yday, &config(1.5, 50.0));
        assert_ne!(eval.kind, SignalKind::Buy);

        yday.rsi14 = None; // undefined yesterday: rising vacuously true
        yday.macd_hist = today.macd_hist;
        let eval = evaluate(&today, &yday, &config(1.5, 50.0));
        assert_eq!(eval.kind, SignalKind::Buy);
    }

    #[test]
    fn mode_b_fresh_cross_fires_buy() {
        let mut today = bare_row(100.0);
        today.ema_fast = Some(100.5);
        today.ema_slow = Some(100.0);
        today.vol_ratio = Some(0.95);
        today.rsi14 = Some(44.0); // >= max(43, 45-5) = 43 at the default floor
        let mut yday = bare_row(99.0);
        yday.ema_fast = Some(99.5);
        yday.ema_slow = Some(100.0);
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_eq!(eval.kind, SignalKind::Buy);
    }

    #[test]
    fn mode_b_floor_tracks_rsi_min() {
        // With floor 50 the cross gate is max(43, 45) = 45; RSI 44 misses it.
        let mut today = bare_row(100.0);
        today.ema_fast = Some(100.5);
        today.ema_slow = Some(100.0);
        today.vol_ratio = Some(0.95);
        today.rsi14 = Some(44.0);
        let mut yday = bare_row(99.0);
        yday.ema_fast = Some(99.5);
        yday.ema_slow = Some(100.0);
        let eval = evaluate(&today, &yday, &config(1.15, 50.0));
        assert_ne!(eval.kind, SignalKind::Buy);
    }

    #[test]
    fn mode_c_pullback_fires_buy() {
        let mut today = bare_row(99.0);
        today.ema_fast = Some(98.0);
        today.ema_slow = Some(95.0);
        today.macd_hist = Some(0.1);
        today.vol_ratio = Some(1.0);
        today.rsi14 = Some(50.0);
        today.prior_n_high = Some(100.0); // gap = 1%, inside the 2% band
        let yday = today.clone();
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_eq!(eval.kind, SignalKind::Buy);
    }

    #[test]
    fn mode_c_band_is_strictly_below_the_high() {
        let mut today = bare_row(100.0);
        today.ema_fast = Some(98.0);
        today.ema_slow = Some(95.0);
        today.macd_hist = Some(0.1);
        today.vol_ratio = Some(1.0);
        today.rsi14 = Some(50.0);
        today.prior_n_high = Some(100.0); // gap = 0: at the high, not below it
        let mut yday = today.clone();
        yday.rsi14 = Some(55.0); // not rising, so A cannot fire either
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_ne!(eval.kind, SignalKind::Buy);
    }

    #[test]
    fn mode_d_thrust_fires_buy() {
        let mut today = bare_row(102.0);
        today.ema_fast = Some(101.0);
        today.ema_slow = Some(100.0); // close/ema_slow = 1.02
        today.macd_hist = Some(0.3);
        today.vol_ratio = Some(0.95);
        today.rsi14 = Some(55.0);
        let mut yday = today.clone();
        yday.macd_hist = Some(0.2); // histogram rising
        yday.rsi14 = Some(56.0); // RSI not rising: A out of play
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_eq!(eval.kind, SignalKind::Buy);

        yday.macd_hist = Some(0.4); // histogram falling: D off
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_ne!(eval.kind, SignalKind::Buy);
    }

    #[test]
    fn watch_fires_only_when_buy_does_not() {
        let mut today = bare_row(97.5);
        today.ema_fast = Some(97.3);
        today.ema_slow = Some(96.6); // uptrend, but close/ema_slow < 1.01 keeps D quiet
        today.macd_hist = Some(0.05);
        today.vol_ratio = Some(0.85); // below every BUY volume gate
        today.rsi14 = Some(42.0);
        today.prior_n_high = Some(100.0); // gap = 2.5%: outside BUY band, inside WATCH
        let yday = today.clone();
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_eq!(eval.kind, SignalKind::Watch);
        assert!(eval.reasons.is_empty());
    }

    #[test]
    fn no_signal_collects_failure_categories() {
        // Downtrend, weak volume, weak RSI, negative histogram — but a
        // breakout in price, so "setup" is not among the reasons.
        let mut today = bare_row(100.0);
        today.ema_fast = Some(95.0);
        today.ema_slow = Some(100.0);
        today.vol_ratio = Some(0.5);
        today.rsi14 = Some(35.0);
        today.macd_hist = Some(-0.5);
        today.prior_n_high = Some(98.0);
        let yday = today.clone();
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_eq!(eval.kind, SignalKind::None);
        let expected: BTreeSet<_> = [
            FailReason::Trend,
            FailReason::Volume,
            FailReason::Rsi,
            FailReason::Macd,
        ]
        .into_iter()
        .collect();
        assert_eq!(eval.reasons, expected);
    }

    #[test]
    fn setup_reason_when_nowhere_near_the_high() {
        let mut today = bare_row(80.0);
        today.ema_fast = Some(79.0);
        today.ema_slow = Some(82.0);
        today.vol_ratio = Some(0.5);
        today.rsi14 = Some(35.0);
        today.macd_hist = Some(-0.5);
        today.prior_n_high = Some(100.0);
        let yday = today.clone();
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert!(eval.reasons.contains(&FailReason::Setup));
    }

    #[test]
    fn diagnostics_off_returns_empty_reasons() {
        let today = bare_row(100.0);
        let yday = bare_row(99.0);
        let mut cfg = config(1.15, 45.0);
        cfg.diagnostics = false;
        let eval = evaluate(&today, &yday, &cfg);
        assert_eq!(eval.kind, SignalKind::None);
        assert!(eval.reasons.is_empty());
    }

    #[test]
    fn undefined_values_satisfy_nothing() {
        // All-but-close undefined: every gate fails, nothing fires.
        let today = bare_row(100.0);
        let yday = bare_row(99.0);
        let eval = evaluate(&today, &yday, &config(1.15, 45.0));
        assert_eq!(eval.kind, SignalKind::None);
        // Every category failed.
        assert_eq!(eval.reasons.len(), 5);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let today = breakout_row(110.0);
        let yday = yesterday_for(&today);
        let cfg = config(1.5, 50.0);
        assert_eq!(evaluate(&today, &yday, &cfg), evaluate(&today, &yday, &cfg));
    }
}
