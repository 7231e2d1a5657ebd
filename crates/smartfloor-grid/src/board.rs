//! Per-board spatial reconstruction from raw sensor rows.

use ndarray::{Array2, Array3};
use smartfloor_core::{Error, Result, Timestamp};

use crate::layout::{BoardId, SensorRow, BOARD_HEIGHT, BOARD_WIDTH, SENSOR_LAYOUT};

/// A single board's readings mapped into their physical tile positions,
/// indexed by time.
#[derive(Debug, Clone)]
pub struct BoardRecording {
    id: BoardId,
    /// Where the left-most tile of this board begins on the floor
    origin_x: usize,
    times: Vec<Timestamp>,
    /// Axes: (time, y, x), with y growing from the bottom of the board
    frames: Array3<f64>,
}

impl BoardRecording {
    /// Build a board recording from this board's raw rows.
    ///
    /// Rows are sorted by timestamp; duplicate timestamps keep the first row.
    pub fn from_rows(id: BoardId, origin_x: usize, rows: &[&SensorRow]) -> Result<Self> {
        let mut sorted: Vec<&SensorRow> = rows.to_vec();
        sorted.sort_by_key(|row| row.time);
        sorted.dedup_by_key(|row| row.time);

        let mut times = Vec::with_capacity(sorted.len());
        let mut frames = Array3::zeros((sorted.len(), BOARD_HEIGHT, BOARD_WIDTH));

        for (t, row) in sorted.iter().enumerate() {
            times.push(row.time);
            let frame = Self::map_row(row)?;
            frames
                .index_axis_mut(ndarray::Axis(0), t)
                .assign(&frame);
        }

        Ok(Self {
            id,
            origin_x,
            times,
            frames,
        })
    }

    /// Place one row's readings into their tile positions.
    fn map_row(row: &SensorRow) -> Result<Array2<f64>> {
        let mut frame = Array2::zeros((BOARD_HEIGHT, BOARD_WIDTH));
        for (r, layout_row) in SENSOR_LAYOUT.iter().enumerate() {
            let y = BOARD_HEIGHT - 1 - r;
            for (x, &sensor) in layout_row.iter().enumerate() {
                let value = row
                    .readings
                    .get(sensor)
                    .ok_or(Error::MissingSensor { sensor })?;
                frame[[y, x]] = f64::from(*value);
            }
        }
        Ok(frame)
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn origin_x(&self) -> usize {
        self.origin_x
    }

    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First and last capture time, if any samples exist.
    pub fn time_range(&self) -> Option<(Timestamp, Timestamp)> {
        match (self.times.first(), self.times.last()) {
            (Some(&lo), Some(&hi)) => Some((lo, hi)),
            _ => None,
        }
    }

    /// Mean sample rate over the recording, in Hz.
    pub fn sample_rate_hz(&self) -> Option<f64> {
        let (lo, hi) = self.time_range()?;
        let span = (hi.as_millis() - lo.as_millis()) as f64;
        if span <= 0.0 || self.times.len() < 2 {
            return None;
        }
        Some((self.times.len() - 1) as f64 * 1_000.0 / span)
    }

    /// Pressure stream of a single tile over time.
    pub fn tile_series(&self, y: usize, x: usize) -> Vec<f64> {
        (0..self.times.len())
            .map(|t| self.frames[[t, y, x]])
            .collect()
    }
}
