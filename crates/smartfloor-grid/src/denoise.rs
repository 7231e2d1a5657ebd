//! Baseline subtraction and peak-proximity masking.
//!
//! A walking subject loads one small patch of tiles at a time, while the
//! rest of the floor carries static offsets and cross-talk. Denoising first
//! subtracts the captured baseline, clamping at zero, then keeps only the
//! tiles within a fixed Chebyshev radius of the frame's pressure peak.

use ndarray::{Array2, Array3, Axis};

use crate::grid::{NoiseBaseline, PressureGrid};
use crate::layout::{FLOOR_HEIGHT, FLOOR_WIDTH};

/// Default mask radius around the peak tile, in tiles
pub const DEFAULT_RADIUS: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct Denoiser {
    radius: usize,
}

impl Default for Denoiser {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

impl Denoiser {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Denoise every frame of a grid against the baseline.
    ///
    /// A frame that is entirely zero after subtraction has no peak; it is
    /// passed through as all-zero.
    pub fn denoise(&self, grid: &PressureGrid, baseline: &NoiseBaseline) -> PressureGrid {
        let mut frames = Array3::zeros((grid.len(), FLOOR_HEIGHT, FLOOR_WIDTH));
        for t in 0..grid.len() {
            let frame = self.denoise_frame(&grid.frame(t).to_owned(), baseline);
            frames.index_axis_mut(Axis(0), t).assign(&frame);
        }
        PressureGrid::new(grid.times().to_vec(), frames)
    }

    fn denoise_frame(&self, frame: &Array2<f64>, baseline: &NoiseBaseline) -> Array2<f64> {
        let mut cleaned = (frame - baseline.frame()).mapv(|v| v.max(0.0));

        let peak = match peak_tile(&cleaned) {
            Some(peak) => peak,
            None => return cleaned,
        };

        for y in 0..FLOOR_HEIGHT {
            for x in 0..FLOOR_WIDTH {
                if chebyshev(peak, (y, x)) > self.radius {
                    cleaned[[y, x]] = 0.0;
                }
            }
        }
        cleaned
    }
}

/// The tile with maximum pressure, or `None` when the frame is all zero.
fn peak_tile(frame: &Array2<f64>) -> Option<(usize, usize)> {
    let mut best = None;
    let mut best_value = 0.0;
    for ((y, x), &value) in frame.indexed_iter() {
        if value > best_value {
            best_value = value;
            best = Some((y, x));
        }
    }
    best
}

fn chebyshev(a: (usize, usize), b: (usize, usize)) -> usize {
    let dy = a.0.abs_diff(b.0);
    let dx = a.1.abs_diff(b.1);
    dy.max(dx)
}
