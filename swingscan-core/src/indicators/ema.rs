//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1).
//! The recursion is seeded at the first available value, and the output stays
//! undefined until `period` observations have been seen — the same shape the
//! scanner's upstream feed produces with `ewm(adjust=False, min_periods=period)`.

/// EMA over a fully-defined series (e.g. closes).
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    ema_of_series(&wrapped, period)
}

/// EMA over a series with undefined leading values (e.g. a MACD line).
///
/// The recursion starts at the first defined value. An undefined value after
/// the start taints everything from that index on.
pub fn ema_of_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 {
        return result;
    }

    let start = match values.iter().position(|v| v.is_some()) {
        Some(i) => i,
        None => return result,
    };

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = values[start].unwrap_or_default();
    let mut seen = 1usize;
    if seen >= period {
        result[start] = Some(prev);
    }

    for i in (start + 1)..n {
        let v = match values[i] {
            Some(v) => v,
            None => return result,
        };
        prev = alpha * v + (1.0 - alpha) * prev;
        seen += 1;
        if seen >= period {
            result[i] = Some(prev);
        }
    }

    result
}
