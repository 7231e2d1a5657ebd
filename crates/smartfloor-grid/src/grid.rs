//! The assembled floor pressure grid.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use smartfloor_core::Timestamp;

use crate::layout::{FLOOR_HEIGHT, FLOOR_WIDTH};

/// Dense 16x8 pressure map indexed by time.
///
/// Axes of the backing array are (time, y, x); `(0, 0)` is the bottom-left
/// tile of the floor. Timestamps are strictly increasing and unique, and
/// every value is non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureGrid {
    times: Vec<Timestamp>,
    frames: Array3<f64>,
}

impl PressureGrid {
    pub fn new(times: Vec<Timestamp>, frames: Array3<f64>) -> Self {
        assert_eq!(frames.shape()[0], times.len());
        assert_eq!(frames.shape()[1], FLOOR_HEIGHT);
        assert_eq!(frames.shape()[2], FLOOR_WIDTH);
        Self { times, frames }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    pub fn frames(&self) -> &Array3<f64> {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> ArrayView2<'_, f64> {
        self.frames.index_axis(Axis(0), index)
    }

    /// Total pressure across the floor at one time step.
    pub fn total(&self, index: usize) -> f64 {
        self.frame(index).sum()
    }

    /// Restrict the grid to timestamps within `[start, end]`.
    pub fn slice_time(&self, start: Timestamp, end: Timestamp) -> PressureGrid {
        let keep: Vec<usize> = self
            .times
            .iter()
            .enumerate()
            .filter(|(_, t)| **t >= start && **t <= end)
            .map(|(i, _)| i)
            .collect();

        let mut frames = Array3::zeros((keep.len(), FLOOR_HEIGHT, FLOOR_WIDTH));
        let mut times = Vec::with_capacity(keep.len());
        for (dst, &src) in keep.iter().enumerate() {
            frames.index_axis_mut(Axis(0), dst).assign(&self.frame(src));
            times.push(self.times[src]);
        }
        PressureGrid::new(times, frames)
    }
}

/// The static pressure signature of the unloaded floor, captured from the
/// first aligned frame and used only for subtraction.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBaseline {
    frame: Array2<f64>,
}

impl NoiseBaseline {
    pub fn from_frame(frame: Array2<f64>) -> Self {
        assert_eq!(frame.shape(), [FLOOR_HEIGHT, FLOOR_WIDTH]);
        Self { frame }
    }

    /// Capture the baseline from a grid's first frame.
    pub fn capture(grid: &PressureGrid) -> Option<Self> {
        if grid.is_empty() {
            return None;
        }
        Some(Self::from_frame(grid.frame(0).to_owned()))
    }

    pub fn frame(&self) -> &Array2<f64> {
        &self.frame
    }
}
