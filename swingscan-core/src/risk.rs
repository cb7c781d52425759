//! Risk metadata for BUY signals — protective stop, target, trailing distance.
//!
//! stop = min(volatility stop, prior swing low) when both exist; otherwise
//! whichever exists. target = close + 2 × (close − stop) when a stop exists
//! (2:1 reward-to-risk), else close + 3 × ATR. trail = ATR × trail multiplier.
//! An undefined ATR is treated as zero, which disables every ATR-derived leg.

use crate::config::ScanConfig;
use crate::domain::RiskMeta;
use crate::indicators::IndicatorRow;

pub fn build_risk(today: &IndicatorRow, config: &ScanConfig) -> RiskMeta {
    let close = today.bar.close;
    let atr = today.atr14.unwrap_or(0.0);

    let stop_by_volatility = if atr > 0.0 {
        Some(close - config.atr_stop_mult * atr)
    } else {
        None
    };
    let stop_by_structure = today.prior_swing_low;

    let stop = match (stop_by_volatility, stop_by_structure) {
        (Some(v), Some(s)) => Some(v.min(s)),
        (Some(v), None) => Some(v),
        (None, Some(s)) => Some(s),
        (None, None) => None,
    };

    let target = match stop {
        Some(stop) => Some(close + 2.0 * (close - stop)),
        None if atr > 0.0 => Some(close + 3.0 * atr),
        None => None,
    };

    let trail_distance = if atr > 0.0 {
        Some(config.atr_trail_mult * atr)
    } else {
        None
    };

    RiskMeta {
        stop,
        target,
        trail_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use crate::indicators::IndicatorRow;

    fn row(close: f64, atr14: Option<f64>, prior_swing_low: Option<f64>) -> IndicatorRow {
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
            atr14,
            vol_ma20: None,
            vol_ratio: None,
            prior_n_high: None,
            prior_swing_low,
        }
    }

    fn config() -> ScanConfig {
        ScanConfig {
            atr_stop_mult: 1.5,
            atr_trail_mult: 3.0,
            ..ScanConfig::default()
        }
    }

    #[test]
    fn stop_takes_the_lower_of_both_legs() {
        // ATR 2 → volatility stop 100 - 1.5*2 = 97; swing low 96.
        let meta = build_risk(&row(100.0, Some(2.0), Some(96.0)), &config());
        assert_eq!(meta.stop, Some(96.0));
        assert_eq!(meta.target, Some(100.0 + 2.0 * 4.0));
        assert_eq!(meta.trail_distance, Some(6.0));
    }

    #[test]
    fn volatility_stop_alone() {
        let meta = build_risk(&row(100.0, Some(2.0), None), &config());
        assert_eq!(meta.stop, Some(97.0));
        assert_eq!(meta.target, Some(106.0));
    }

    #[test]
    fn structural_stop_alone() {
        let meta = build_risk(&row(100.0, None, Some(95.0)), &config());
        assert_eq!(meta.stop, Some(95.0));
        assert_eq!(meta.target, Some(110.0));
        assert_eq!(meta.trail_distance, None);
    }

    #[test]
    fn no_inputs_no_levels() {
        let meta = build_risk(&row(100.0, None, None), &config());
        assert_eq!(meta.stop, None);
        assert_eq!(meta.target, None);
        assert_eq!(meta.trail_distance, None);
    }

    #[test]
    fn zero_atr_behaves_like_undefined() {
        let meta = build_risk(&row(100.0, Some(0.0), None), &config());
        assert_eq!(meta.stop, None);
        assert_eq!(meta.target, None);
        assert_eq!(meta.trail_distance, None);
    }

    #[test]
    fn target_is_two_to_one_from_the_final_stop() {
        // Swing low above the volatility stop: the tighter ATR stop wins.
        let meta = build_risk(&row(50.0, Some(1.0), Some(49.5)), &config());
        assert_eq!(meta.stop, Some(48.5));
        assert_eq!(meta.target, Some(50.0 + 2.0 * 1.5));
    }

    #[test]
    fn stop_below_close_when_atr_positive() {
        let meta = build_risk(&row(100.0, Some(0.5), Some(99.9)), &config());
        assert!(meta.stop.unwrap() < 100.0);
    }
}
