//! Batch scan orchestration — fans a universe out across worker threads.
//!
//! Each symbol runs the full fetch → normalize → analyze pipeline in
//! isolation; a fetch failure is recorded against that symbol and the rest
//! of the batch continues. `par_iter().map().collect()` keeps results in
//! input order, so a report rendered from the same universe is stable
//! run to run.

use rayon::prelude::*;
use serde::Serialize;

use swingscan_core::config::ScanConfig;
use swingscan_core::data::{normalize, BarProvider, DataError};
use swingscan_core::domain::{SignalKind, SignalResult, SkipReason, SymbolOutcome};
use swingscan_core::scan::analyze_symbol;

/// A fetch failure attributed to one symbol.
#[derive(Debug)]
pub struct ScanError {
    pub symbol: String,
    pub error: DataError,
}

/// A symbol excluded before evaluation, with the gate that excluded it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

/// Aggregated outcome of one scan pass over a universe.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub buys: Vec<SignalResult>,
    pub watches: Vec<SignalResult>,
    /// Symbols that evaluated to no signal. Their `reasons` sets are empty
    /// unless diagnostics were enabled.
    pub misses: Vec<SignalResult>,
    pub skips: Vec<SkippedSymbol>,
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    /// Number of symbols the scan attempted.
    pub fn total(&self) -> usize {
        self.buys.len() + self.watches.len() + self.misses.len() + self.skips.len() + self.errors.len()
    }

    /// Number of symbols that produced an evaluation (signal or miss).
    pub fn evaluated(&self) -> usize {
        self.buys.len() + self.watches.len() + self.misses.len()
    }
}

/// Scan every symbol in the universe against the given provider.
///
/// Never fails as a whole: per-symbol fetch errors land in
/// [`ScanReport::errors`] and everything else proceeds.
pub fn run_scan(symbols: &[String], provider: &dyn BarProvider, config: &ScanConfig) -> ScanReport {
    log::info!(
        "scanning {} symbols via {} ({} {})",
        symbols.len(),
        provider.name(),
        config.period,
        config.interval
    );

    let outcomes: Vec<_> = symbols
        .par_iter()
        .map(|symbol| scan_one(symbol, provider, config))
        .collect();

    let mut report = ScanReport::default();
    for (symbol, outcome) in symbols.iter().zip(outcomes) {
        match outcome {
            Ok(SymbolOutcome::Signal(result)) => match result.kind {
                SignalKind::Buy => report.buys.push(result),
                SignalKind::Watch => report.watches.push(result),
                SignalKind::None => report.misses.push(result),
            },
            Ok(SymbolOutcome::Skip(reason)) => {
                log::debug!("{symbol}: skipped ({reason})");
                report.skips.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason,
                });
            }
            Err(error) => report.errors.push(error),
        }
    }
    log::info!(
        "scan complete: {} buy, {} watch, {} skipped, {} errors",
        report.buys.len(),
        report.watches.len(),
        report.skips.len(),
        report.errors.len()
    );
    report
}

fn scan_one(
    symbol: &str,
    provider: &dyn BarProvider,
    config: &ScanConfig,
) -> Result<SymbolOutcome, ScanError> {
    let frame = provider
        .fetch(symbol, &config.period, &config.interval)
        .map_err(|error| {
            log::warn!("{symbol}: fetch failed: {error}");
            ScanError {
                symbol: symbol.to_string(),
                error,
            }
        })?;
    let bars = normalize(&frame);
    log::debug!("{symbol}: {} usable bars", bars.len());
    Ok(analyze_symbol(symbol, &bars, config))
}
