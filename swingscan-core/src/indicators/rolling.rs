//! Rolling-window helpers shared by ATR, volume and breakout-reference series.

/// Rolling mean requiring a full window of defined values.
///
/// Output[i] is defined only when all `window` values ending at i are.
pub fn rolling_mean_full(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let mut sum = 0.0;
        let mut complete = true;
        for v in &values[i + 1 - window..=i] {
            match v {
                Some(v) => sum += v,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            result[i] = Some(sum / window as f64);
        }
    }

    result
}

/// Rolling mean over up to `window` values, defined once `min_periods`
/// observations are available (pandas `rolling(window, min_periods)`).
pub fn rolling_mean_min_periods(
    values: &[f64],
    window: usize,
    min_periods: usize,
) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 {
        return result;
    }

    for i in 0..n {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        if slice.len() >= min_periods {
            result[i] = Some(slice.iter().sum::<f64>() / slice.len() as f64);
        }
    }

    result
}

/// Rolling max over the `window` values strictly before each index.
///
/// Output[i] never depends on values[i]; the first `window` entries are
/// undefined because no full prior window exists yet.
pub fn rolling_max_prior(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 {
        return result;
    }

    for i in window..n {
        let max = values[i - window..i]
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        result[i] = Some(max);
    }

    result
}

/// Rolling min over the `window` values strictly before each index, with the
/// full-window requirement: any undefined value in the window makes the
/// output undefined.
pub fn rolling_min_prior(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 {
        return result;
    }

    for i in window..n {
        let mut min = f64::INFINITY;
        let mut complete = true;
        for v in &values[i - window..i] {
            match v {
                Some(v) => min = min.min(*v),
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            result[i] = Some(min);
        }
    }

    result
}
