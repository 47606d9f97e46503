// src/aggregation/stats.rs

use statrs::statistics::Statistics;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.mean())
}

/// Sample standard deviation (n - 1), `None` with fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.std_dev())
}

/// Sample standard deviation of daily totals over a window of
/// `window_days` days, where only the days with activity are listed in
/// `active_days`. The remaining days count as zero.
///
/// Returns 0 when the window holds fewer than two days.
pub fn windowed_daily_std_dev(active_days: &[f64], window_days: usize) -> f64 {
    let n = window_days.max(active_days.len());
    let mut window = Vec::with_capacity(n);
    window.extend_from_slice(active_days);
    window.resize(n, 0.0);
    sample_std_dev(&window).unwrap_or(0.0)
}
