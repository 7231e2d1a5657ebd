//! Alignment of independent board clocks onto one uniform time axis.
//!
//! Each board samples on its own schedule. The floor's usable range is the
//! intersection of all board ranges; within it, every tile's pressure
//! stream is linearly interpolated onto a shared axis at the configured
//! sampling period.

use ndarray::{Array3, Axis};
use smartfloor_core::{Error, Result, Timestamp};

use crate::board::BoardRecording;
use crate::grid::PressureGrid;
use crate::layout::{BOARD_HEIGHT, BOARD_WIDTH, FLOOR_HEIGHT, FLOOR_WIDTH};

/// The time range in which every board has contiguous readings.
pub fn common_range(boards: &[BoardRecording]) -> Result<(Timestamp, Timestamp)> {
    let mut lo: Option<Timestamp> = None;
    let mut hi: Option<Timestamp> = None;

    for board in boards {
        let (start, end) = board.time_range().ok_or(Error::NoCommonTimeRange)?;
        lo = Some(lo.map_or(start, |t| t.max(start)));
        hi = Some(hi.map_or(end, |t| t.min(end)));
    }

    match (lo, hi) {
        (Some(lo), Some(hi)) if lo <= hi => Ok((lo, hi)),
        _ => Err(Error::NoCommonTimeRange),
    }
}

/// Uniform sample instants from `start` to `end` at the given period.
pub fn uniform_axis(start: Timestamp, end: Timestamp, period_ms: i64) -> Vec<Timestamp> {
    assert!(period_ms > 0, "sampling period must be positive");
    let mut axis = Vec::new();
    let mut t = start.as_millis();
    while t <= end.as_millis() {
        axis.push(Timestamp::from_millis(t));
        t += period_ms;
    }
    axis
}

/// Linear interpolation of one tile's stream onto the target instants.
///
/// Instants outside the source range produce NaN, which marks the frame for
/// dropping during assembly.
fn interp_onto(times: &[Timestamp], values: &[f64], axis: &[Timestamp]) -> Vec<f64> {
    axis.iter()
        .map(|t| {
            let t_ms = t.as_millis();
            if times.is_empty()
                || t_ms < times[0].as_millis()
                || t_ms > times[times.len() - 1].as_millis()
            {
                return f64::NAN;
            }
            let after = times.partition_point(|s| s.as_millis() < t_ms);
            if after < times.len() && times[after].as_millis() == t_ms {
                return values[after];
            }
            let (i0, i1) = (after - 1, after);
            let t0 = times[i0].as_millis() as f64;
            let t1 = times[i1].as_millis() as f64;
            let alpha = (t_ms as f64 - t0) / (t1 - t0);
            values[i0] + alpha * (values[i1] - values[i0])
        })
        .collect()
}

/// Interpolate all boards onto the axis and concatenate them into the floor
/// grid, dropping frames that still contain gaps and clamping any
/// interpolation undershoot to zero.
pub fn align_boards(boards: &[BoardRecording], axis: &[Timestamp]) -> PressureGrid {
    let mut frames = Array3::from_elem((axis.len(), FLOOR_HEIGHT, FLOOR_WIDTH), f64::NAN);

    for board in boards {
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let series = board.tile_series(y, x);
                let resampled = interp_onto(board.times(), &series, axis);
                for (t, value) in resampled.into_iter().enumerate() {
                    frames[[t, y, board.origin_x() + x]] = value;
                }
            }
        }
    }

    let keep: Vec<usize> = (0..axis.len())
        .filter(|&t| frames.index_axis(Axis(0), t).iter().all(|v| v.is_finite()))
        .collect();

    let dropped = axis.len() - keep.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped frames with interpolation gaps");
    }

    let mut out = Array3::zeros((keep.len(), FLOOR_HEIGHT, FLOOR_WIDTH));
    let mut times = Vec::with_capacity(keep.len());
    for (dst, &src) in keep.iter().enumerate() {
        let frame = frames.index_axis(Axis(0), src).mapv(|v| v.max(0.0));
        out.index_axis_mut(Axis(0), dst).assign(&frame);
        times.push(axis[src]);
    }

    PressureGrid::new(times, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoardId, SensorRow, SENSORS_PER_BOARD};

    fn board_rows(times_ms: &[i64], value: u16) -> Vec<SensorRow> {
        times_ms
            .iter()
            .map(|&t| {
                let mut readings = vec![0u16; SENSORS_PER_BOARD];
                readings[18] = value;
                SensorRow::new(BoardId(19), Timestamp::from_millis(t), readings)
            })
            .collect()
    }

    fn board_from(times_ms: &[i64], value: u16, origin_x: usize) -> BoardRecording {
        let rows = board_rows(times_ms, value);
        let refs: Vec<&SensorRow> = rows.iter().collect();
        BoardRecording::from_rows(BoardId(19), origin_x, &refs).unwrap()
    }

    #[test]
    fn test_common_range_is_intersection() {
        let a = board_from(&[0, 40, 80, 120], 1, 0);
        let b = board_from(&[20, 60, 100], 1, 4);
        let (lo, hi) = common_range(&[a, b]).unwrap();
        assert_eq!(lo, Timestamp::from_millis(20));
        assert_eq!(hi, Timestamp::from_millis(100));
    }

    #[test]
    fn test_disjoint_ranges_are_an_error() {
        let a = board_from(&[0, 40], 1, 0);
        let b = board_from(&[200, 240], 1, 4);
        assert!(matches!(
            common_range(&[a, b]),
            Err(Error::NoCommonTimeRange)
        ));
    }

    #[test]
    fn test_uniform_axis_spacing() {
        let axis = uniform_axis(Timestamp::from_millis(0), Timestamp::from_millis(100), 40);
        assert_eq!(
            axis,
            vec![
                Timestamp::from_millis(0),
                Timestamp::from_millis(40),
                Timestamp::from_millis(80)
            ]
        );
    }

    #[test]
    fn test_interpolation_midpoint() {
        let times = vec![Timestamp::from_millis(0), Timestamp::from_millis(100)];
        let values = vec![0.0, 10.0];
        let axis = vec![Timestamp::from_millis(50)];
        let out = interp_onto(&times, &values, &axis);
        assert!((out[0] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_outside_range_is_nan() {
        let times = vec![Timestamp::from_millis(40), Timestamp::from_millis(80)];
        let values = vec![1.0, 2.0];
        let axis = vec![Timestamp::from_millis(0), Timestamp::from_millis(120)];
        let out = interp_onto(&times, &values, &axis);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
    }

    #[test]
    fn test_alignment_drops_gap_frames() {
        // One board starts later than the axis; its leading frames have
        // gaps and must be dropped from the assembled grid.
        let boards = vec![
            board_from(&[0, 40, 80, 120], 100, 0),
            board_from(&[40, 80, 120], 200, 4),
            board_from(&[0, 40, 80, 120], 300, 8),
            board_from(&[0, 40, 80, 120], 400, 12),
        ];
        let axis = uniform_axis(Timestamp::from_millis(0), Timestamp::from_millis(120), 40);
        let grid = align_boards(&boards, &axis);

        assert_eq!(grid.len(), 3);
        assert_eq!(grid.times()[0], Timestamp::from_millis(40));
        // Sensor 18 of each board lands at y = 7, x = its board origin.
        assert_eq!(grid.frame(0)[[7, 0]], 100.0);
        assert_eq!(grid.frame(0)[[7, 4]], 200.0);
        assert_eq!(grid.frame(0)[[7, 8]], 300.0);
        assert_eq!(grid.frame(0)[[7, 12]], 400.0);
    }
}
