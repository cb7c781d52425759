//! Batch orchestration for the swing scanner.
//!
//! Ties the core pipeline to a universe and a provider: load symbols from
//! CSV, fan the scan out over rayon, and render the aggregate as text.
//! Delivery (chat, mail, stdout) is left to the binary embedding this crate.

pub mod batch;
pub mod report;
pub mod universe;

pub use batch::{run_scan, ScanError, ScanReport, SkippedSymbol};
pub use report::render_report;
pub use universe::{load_universe, read_universe, UniverseError};
