use crate::models::market::MarketSnapshot;

/// Maximum number of points kept in a downsampled series.
pub const SERIES_TARGET_LEN: usize = 30;

/// Decimate a raw price series to at most [`SERIES_TARGET_LEN`] points
/// and derive the percent change between the first and last kept samples.
///
/// Every stride-th element is kept starting at index 0, where stride is
/// `max(1, ceil(len / 30))` — no interpolation, no averaging, order
/// preserved. Inputs of 30 or fewer points pass through unchanged.
///
/// `change_pct` is 0 when the series is empty or its first sample is 0.
///
/// Pure function: identical input always yields identical output.
pub fn downsample(raw: &[f64]) -> MarketSnapshot {
    let stride = (raw.len().div_ceil(SERIES_TARGET_LEN)).max(1);
    let series: Vec<f64> = raw.iter().step_by(stride).copied().collect();

    let first = series.first().copied().unwrap_or(0.0);
    let last = series.last().copied().unwrap_or(0.0);
    let change_pct = if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    };

    MarketSnapshot { series, change_pct }
}
