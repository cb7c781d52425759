//! SwingScan Core — normalization, indicators, signal evaluation, risk levels.
//!
//! This crate contains the computation half of the scanner:
//! - Domain types (bars, signal results, skip/failure taxonomies)
//! - Table normalizer (raw provider frame → canonical bar sequence)
//! - Indicator kernels and the per-symbol indicator engine
//! - The four-mode BUY / WATCH evaluator with diagnostic categories
//! - Risk metadata (stop, target, trailing distance) for BUY signals
//!
//! Everything past the provider trait is pure: no I/O, no clock, no shared
//! state, so a whole-universe scan can fan out per symbol without locks.

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod risk;
pub mod scan;
pub mod signal;

pub use config::ScanConfig;
pub use scan::analyze_symbol;
