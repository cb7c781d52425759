//! Per-symbol analysis pipeline: history gates, indicators, evaluation, risk.
//!
//! Pure over already-normalized bars. All exclusions are soft — they come
//! back as `SymbolOutcome::Skip`, never as errors.

use crate::config::ScanConfig;
use crate::domain::{SignalKind, SignalResult, SkipReason, Snapshot, SymbolOutcome};
use crate::indicators::{compute_indicators, IndicatorRow};
use crate::risk::build_risk;
use crate::signal::evaluate;

/// Fraction of volume observations that may be missing or zero before the
/// symbol is considered illiquid or badly fed.
const MAX_BAD_VOLUME_FRACTION: f64 = 0.5;

/// Analyze one symbol's canonical bar sequence.
pub fn analyze_symbol(symbol: &str, bars: &[crate::domain::Bar], config: &ScanConfig) -> SymbolOutcome {
    if bars.is_empty() {
        return SymbolOutcome::Skip(SkipReason::NoData);
    }
    if bars.len() < config.min_history() {
        return SymbolOutcome::Skip(SkipReason::InsufficientHistory);
    }
    if volume_unreliable(bars) {
        return SymbolOutcome::Skip(SkipReason::UnreliableVolume);
    }

    let rows = compute_indicators(bars, config);
    // min_history >= 50 guarantees at least two rows.
    let today = &rows[rows.len() - 1];
    let yesterday = &rows[rows.len() - 2];

    let evaluation = evaluate(today, yesterday, config);
    let risk = match evaluation.kind {
        SignalKind::Buy => Some(build_risk(today, config)),
        _ => None,
    };

    SymbolOutcome::Signal(SignalResult {
        symbol: symbol.to_string(),
        kind: evaluation.kind,
        snapshot: snapshot_of(today),
        reasons: evaluation.reasons,
        risk,
    })
}

/// More than half the volume observations missing, or more than half zero
/// (missing counted as zero), marks the feed as unusable.
fn volume_unreliable(bars: &[crate::domain::Bar]) -> bool {
    let n = bars.len() as f64;
    let missing = bars.iter().filter(|b| b.volume.is_none()).count() as f64;
    let zero_or_missing = bars
        .iter()
        .filter(|b| b.volume.unwrap_or(0.0) == 0.0)
        .count() as f64;
    missing / n > MAX_BAD_VOLUME_FRACTION || zero_or_missing / n > MAX_BAD_VOLUME_FRACTION
}

fn snapshot_of(row: &IndicatorRow) -> Snapshot {
    Snapshot {
        close: row.bar.close,
        ema_fast: row.ema_fast,
        ema_slow: row.ema_slow,
        rsi14: row.rsi14,
        macd_hist: row.macd_hist,
        vol_ratio: row.vol_ratio,
        atr14: row.atr14,
    }
}
