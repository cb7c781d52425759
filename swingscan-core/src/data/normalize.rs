//! Normalizer — raw provider table to canonical bar sequence.
//!
//! Providers hand back whatever their source shaped: mis-cased or padded
//! column names, duplicate representations of the same field, non-numeric
//! cells, missing columns. The normalizer resolves each field to a single
//! numeric value per row, drops rows without a close, sorts ascending by
//! timestamp and dedupes. It never fails loudly: an unusable table becomes
//! an empty sequence for the caller to classify.

use polars::prelude::*;

use crate::domain::Bar;

/// Normalize one symbol's raw table into a canonical bar sequence.
pub fn normalize(df: &DataFrame) -> Vec<Bar> {
    let n = df.height();
    if n == 0 {
        return Vec::new();
    }

    let opens = numeric_field(df, "open", n);
    let highs = numeric_field(df, "high", n);
    let lows = numeric_field(df, "low", n);
    let closes = numeric_field(df, "close", n);
    let volumes = numeric_field(df, "volume", n);
    let timestamps = timestamp_field(df, n);

    let mut bars: Vec<Bar> = (0..n)
        .filter_map(|i| {
            let close = closes[i]?;
            Some(Bar {
                // Null timestamps fall back to the row position, which keeps
                // the source ordering for that row.
                ts: timestamps[i].unwrap_or(i as i64),
                open: opens[i],
                high: highs[i],
                low: lows[i],
                close,
                volume: volumes[i],
            })
        })
        .collect();

    bars.sort_by_key(|b| b.ts);
    bars.dedup_by_key(|b| b.ts);
    bars
}

/// First column whose trimmed name matches case-insensitively. Duplicated
/// representations of a field collapse to the first occurrence.
fn find_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Column> {
    df.get_columns()
        .iter()
        .find(|c| c.name().as_str().trim().eq_ignore_ascii_case(name))
}

/// Coerce a field to one numeric value per row; unparseable cells and
/// missing columns become nulls.
fn numeric_field(df: &DataFrame, name: &str, n: usize) -> Vec<Option<f64>> {
    let Some(column) = find_column(df, name) else {
        return vec![None; n];
    };
    match column.cast(&DataType::Float64) {
        Ok(casted) => match casted.f64() {
            Ok(values) => values.into_iter().collect(),
            Err(_) => vec![None; n],
        },
        Err(_) => vec![None; n],
    }
}

/// Timestamps as i64 (epoch ms for datetime columns). A table without a
/// recognizable timestamp column keeps its row order via indices.
fn timestamp_field(df: &DataFrame, n: usize) -> Vec<Option<i64>> {
    let column = find_column(df, "timestamp")
        .or_else(|| find_column(df, "date"))
        .or_else(|| find_column(df, "datetime"));
    let Some(column) = column else {
        return (0..n).map(|i| Some(i as i64)).collect();
    };
    match column.cast(&DataType::Int64) {
        Ok(casted) => match casted.i64() {
            Ok(values) => values.into_iter().collect(),
            Err(_) => (0..n).map(|i| Some(i as i64)).collect(),
        },
        Err(_) => (0..n).map(|i| Some(i as i64)).collect(),
    }
}
