//! Center-of-pressure extraction and kinematic derivation.

use smartfloor_core::series::{forward_diff, trailing_mean2, SeriesValue};
use smartfloor_core::{CopSample, Vec2};
use smartfloor_grid::PressureGrid;

/// Weighted pressure centroid and total load for every frame of a grid.
///
/// A frame with zero total pressure has no centroid and yields `None`;
/// callers treat that as "no contact this frame", not as an error.
pub fn cop_series(grid: &PressureGrid) -> Vec<Option<CopSample>> {
    (0..grid.len())
        .map(|t| {
            let frame = grid.frame(t);
            let mut total = 0.0;
            let mut weighted_x = 0.0;
            let mut weighted_y = 0.0;
            for ((y, x), &pressure) in frame.indexed_iter() {
                total += pressure;
                weighted_x += pressure * x as f64;
                weighted_y += pressure * y as f64;
            }
            if total > 0.0 {
                Some(CopSample::new(
                    Vec2::new(weighted_x / total, weighted_y / total),
                    total,
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Just the centroid positions of a COP series.
pub fn positions(cop: &[Option<CopSample>]) -> Vec<Option<Vec2>> {
    cop.iter().map(|s| s.map(|s| s.position)).collect()
}

/// First-order derivative of a series: forward difference, a two-sample
/// smoothing average, then division by the sampling period.
///
/// Applied to COP positions this yields velocity; applied again, it yields
/// acceleration and then jerk.
pub fn derivative<T: SeriesValue>(series: &[Option<T>], period_secs: f64) -> Vec<Option<T>> {
    let diffed = forward_diff(series);
    trailing_mean2(&diffed)
        .into_iter()
        .map(|d| d.map(|v| v.scale(1.0 / period_secs)))
        .collect()
}

/// Magnitude of every defined sample of a vector series.
pub fn magnitudes(series: &[Option<Vec2>]) -> Vec<Option<f64>> {
    series.iter().map(|v| v.map(|v| v.magnitude())).collect()
}
