//! Signal result types shared between the evaluator and the reporting layer.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a symbol at evaluation time.
///
/// `Buy` strictly dominates `Watch`: the watch rule is only consulted when
/// no buy mode fired, so a result never carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    Buy,
    Watch,
    None,
}

/// Coarse diagnostic categories for a symbol that produced no signal.
///
/// Collected as a set, not a proof: several categories can apply at once,
/// and the set is only populated when diagnostics are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FailReason {
    /// Fast EMA not above slow EMA.
    Trend,
    /// No breakout, not near the prior high, no EMA-gap thrust.
    Setup,
    /// None of the volume-ratio gates met.
    Volume,
    /// None of the RSI gates met.
    Rsi,
    /// MACD histogram neither non-negative nor rising.
    Macd,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailReason::Trend => "trend",
            FailReason::Setup => "setup",
            FailReason::Volume => "volume",
            FailReason::Rsi => "rsi",
            FailReason::Macd => "macd",
        };
        f.write_str(s)
    }
}

/// Key indicator values captured at decision time.
///
/// Unrounded; the report renderer applies rounding at the output boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub close: f64,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd_hist: Option<f64>,
    pub vol_ratio: Option<f64>,
    pub atr14: Option<f64>,
}

/// Protective levels derived for a BUY signal.
///
/// Every field is optional: each is only defined when its inputs are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMeta {
    /// Lower of the volatility stop and the structural stop (prior swing low).
    pub stop: Option<f64>,
    /// 2:1 reward-to-risk target, or an ATR fallback when no stop exists.
    pub target: Option<f64>,
    /// Trailing-stop distance in price units.
    pub trail_distance: Option<f64>,
}

/// Full evaluation output for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub symbol: String,
    pub kind: SignalKind,
    pub snapshot: Snapshot,
    /// Populated only for `SignalKind::None` with diagnostics enabled.
    pub reasons: BTreeSet<FailReason>,
    /// Populated only for `SignalKind::Buy`.
    pub risk: Option<RiskMeta>,
}

/// Why a symbol was excluded before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Provider returned an empty or entirely unusable table.
    NoData,
    /// Fewer bars than the minimum history window.
    InsufficientHistory,
    /// More than half of volume observations missing or zero.
    UnreliableVolume,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::NoData => "no_data",
            SkipReason::InsufficientHistory => "insufficient_bars",
            SkipReason::UnreliableVolume => "illiquid_or_bad_volume",
        };
        f.write_str(s)
    }
}

/// Per-symbol outcome of the analysis pipeline. Never an error: absence of a
/// usable signal is data, and fetch failures are handled a layer above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SymbolOutcome {
    Signal(SignalResult),
    Skip(SkipReason),
}
