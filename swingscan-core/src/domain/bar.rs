//! Bar — the fundamental market data unit.

use serde::{Deserialize, Serialize};

/// Canonical OHLCV bar for a single symbol on a single day.
///
/// Produced by the normalizer from a raw provider table. `close` is the only
/// field the normalizer guarantees; the rest may be absent for a given row
/// and stay `None` all the way through indicator computation — an undefined
/// input makes every derived value undefined, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Epoch milliseconds, ascending and unique within a sequence.
    pub ts: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl Bar {
    /// True when high and low are both present and ordered sanely.
    pub fn has_range(&self) -> bool {
        matches!((self.high, self.low), (Some(h), Some(l)) if h >= l)
    }
}
