//! Text report rendering.
//!
//! The only place in the pipeline where numbers are rounded: prices to two
//! decimals, RSI to one, MACD histogram to three, volume ratio to two.
//! Undefined values render as "-". Delivery of the rendered text is a
//! caller concern.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use swingscan_core::config::ScanConfig;
use swingscan_core::domain::{SignalResult, SkipReason};

use crate::batch::ScanReport;

/// Diagnostics lines rendered at most, regardless of miss count.
const DIAG_LIMIT: usize = 20;

/// Render a scan report as plain text.
///
/// Returns `None` when there is nothing to say and the config asks for
/// empty reports to be suppressed.
pub fn render_report(
    report: &ScanReport,
    config: &ScanConfig,
    generated_at: DateTime<Utc>,
) -> Option<String> {
    let has_signals = !report.buys.is_empty() || !report.watches.is_empty();
    if !has_signals && !config.send_empty_reports {
        return None;
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Swing scan — {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "{} symbols | vol x{} | RSI floor {} | lookback {}",
        report.total(),
        config.vol_mult,
        config.rsi_min,
        config.breakout_lookback
    );

    if report.buys.is_empty() && report.watches.is_empty() {
        let _ = writeln!(out, "\nNo signals today.");
    }

    if !report.buys.is_empty() {
        let _ = writeln!(out, "\nBUY ({})", report.buys.len());
        for result in &report.buys {
            let _ = writeln!(out, "  {}", buy_line(result));
        }
    }

    if !report.watches.is_empty() {
        let _ = writeln!(out, "\nWATCH ({})", report.watches.len());
        for result in &report.watches {
            let _ = writeln!(out, "  {}", watch_line(result));
        }
    }

    if !report.skips.is_empty() {
        let _ = writeln!(out, "\nSkipped: {}{}", report.skips.len(), skip_breakdown(report));
    }

    let diagnosed: Vec<_> = report
        .misses
        .iter()
        .filter(|m| !m.reasons.is_empty())
        .collect();
    if !diagnosed.is_empty() {
        let _ = writeln!(out, "\nDiagnostics");
        for result in diagnosed.iter().take(DIAG_LIMIT) {
            let reasons: Vec<String> = result.reasons.iter().map(|r| r.to_string()).collect();
            let _ = writeln!(out, "  {}: {}", result.symbol, reasons.join(", "));
        }
        if diagnosed.len() > DIAG_LIMIT {
            let _ = writeln!(out, "  … and {} more", diagnosed.len() - DIAG_LIMIT);
        }
    }

    if !report.errors.is_empty() {
        let cap = config.max_per_msg;
        let _ = writeln!(out, "\nErrors ({})", report.errors.len());
        for error in report.errors.iter().take(cap) {
            let _ = writeln!(out, "  {}: {}", error.symbol, error.error);
        }
        if report.errors.len() > cap {
            let _ = writeln!(out, "  … and {} more", report.errors.len() - cap);
        }
    }

    Some(out)
}

fn buy_line(result: &SignalResult) -> String {
    let s = &result.snapshot;
    let mut line = format!(
        "{} @ {} | RSI {} | MACDh {} | vol {}x",
        result.symbol,
        price(Some(s.close)),
        one_dp(s.rsi14),
        three_dp(s.macd_hist),
        two_dp(s.vol_ratio)
    );
    if let Some(risk) = &result.risk {
        let _ = write!(
            line,
            " | stop {} | target {} | trail {}",
            price(risk.stop),
            price(risk.target),
            price(risk.trail_distance)
        );
    }
    line
}

fn watch_line(result: &SignalResult) -> String {
    let s = &result.snapshot;
    format!(
        "{} @ {} | RSI {} | vol {}x",
        result.symbol,
        price(Some(s.close)),
        one_dp(s.rsi14),
        two_dp(s.vol_ratio)
    )
}

fn skip_breakdown(report: &ScanReport) -> String {
    let count = |reason: SkipReason| {
        report
            .skips
            .iter()
            .filter(|s| s.reason == reason)
            .count()
    };
    let parts: Vec<String> = [
        SkipReason::NoData,
        SkipReason::InsufficientHistory,
        SkipReason::UnreliableVolume,
    ]
    .into_iter()
    .filter_map(|reason| {
        let n = count(reason);
        (n > 0).then(|| format!("{reason} {n}"))
    })
    .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn price(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn one_dp(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

fn two_dp(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn three_dp(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}
