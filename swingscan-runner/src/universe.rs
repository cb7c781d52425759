//! Universe loading — the list of symbols a scan covers.
//!
//! The universe is a CSV file with a `symbol` column (any casing, extra
//! columns ignored). Blank cells are dropped, surrounding whitespace is
//! trimmed, and order is preserved.

use std::fs::File;
use std::path::Path;

use thiserror::Error;

/// Errors from universe loading.
#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("failed to open universe file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read universe file: {0}")]
    Csv(#[from] csv::Error),

    #[error("universe file has no 'symbol' column")]
    MissingSymbolColumn,
}

/// Load the symbol universe from a CSV file.
pub fn load_universe(path: &Path) -> Result<Vec<String>, UniverseError> {
    let file = File::open(path)?;
    read_universe(file)
}

/// Load the universe from any CSV reader.
pub fn read_universe<R: std::io::Read>(reader: R) -> Result<Vec<String>, UniverseError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("symbol"))
        .ok_or(UniverseError::MissingSymbolColumn)?;

    let mut symbols = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(raw) = record.get(column) {
            let symbol = raw.trim();
            if !symbol.is_empty() {
                symbols.push(symbol.to_string());
            }
        }
    }
    Ok(symbols)
}
