//! Domain types: bars, signal results, skip/failure taxonomies.

pub mod bar;
pub mod signal;

pub use bar::Bar;
pub use signal::{
    FailReason, RiskMeta, SignalKind, SignalResult, SkipReason, Snapshot, SymbolOutcome,
};
