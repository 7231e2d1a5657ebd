//! Construction of a complete floor recording from raw sensor rows.

use std::collections::HashMap;

use smartfloor_core::{Error, RecordingId, Result, Timestamp};

use crate::board::BoardRecording;
use crate::denoise::{Denoiser, DEFAULT_RADIUS};
use crate::grid::{NoiseBaseline, PressureGrid};
use crate::layout::{BoardId, SensorRow, BOARD_WIDTH, DEFAULT_BOARD_ORDER, FLOOR_WIDTH};
use crate::resample::{align_boards, common_range, uniform_axis};

/// Default sampling period of the aligned grid, in milliseconds
pub const DEFAULT_PERIOD_MS: i64 = 40;

/// Configuration for grid reconstruction.
#[derive(Debug, Clone)]
pub struct FloorConfig {
    /// Period of the uniform time axis, in milliseconds
    pub period_ms: i64,
    /// Chebyshev mask radius around the per-frame pressure peak, in tiles
    pub denoise_radius: usize,
    /// Board ids in left-to-right floor order
    pub board_order: Vec<BoardId>,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            denoise_radius: DEFAULT_RADIUS,
            board_order: DEFAULT_BOARD_ORDER.to_vec(),
        }
    }
}

impl FloorConfig {
    pub fn with_period_ms(mut self, period_ms: i64) -> Self {
        self.period_ms = period_ms;
        self
    }

    pub fn with_denoise_radius(mut self, radius: usize) -> Self {
        self.denoise_radius = radius;
        self
    }

    pub fn with_board_order(mut self, order: Vec<BoardId>) -> Self {
        self.board_order = order;
        self
    }
}

/// A fully reconstructed recording of one walk across the floor.
///
/// Owns the aligned sample grid, the captured noise baseline, and the
/// denoised pressure grid derived from them.
#[derive(Debug, Clone)]
pub struct FloorRecording {
    id: RecordingId,
    name: String,
    period_ms: i64,
    samples: PressureGrid,
    noise: NoiseBaseline,
    pressure: PressureGrid,
}

impl FloorRecording {
    /// Assemble, align, and denoise a recording from raw log rows.
    pub fn from_rows(
        name: impl Into<String>,
        rows: &[SensorRow],
        config: &FloorConfig,
    ) -> Result<Self> {
        if config.period_ms <= 0 {
            return Err(Error::Config("sampling period must be positive".into()));
        }
        if config.board_order.len() * BOARD_WIDTH != FLOOR_WIDTH {
            return Err(Error::Config(format!(
                "board order must name {} boards",
                FLOOR_WIDTH / BOARD_WIDTH
            )));
        }

        let mut by_board: HashMap<BoardId, Vec<&SensorRow>> = HashMap::new();
        for row in rows {
            if !config.board_order.contains(&row.board) {
                return Err(Error::UnknownBoard { board: row.board.0 });
            }
            by_board.entry(row.board).or_default().push(row);
        }

        let mut boards = Vec::with_capacity(config.board_order.len());
        for (index, board_id) in config.board_order.iter().enumerate() {
            let board_rows = by_board.remove(board_id).unwrap_or_default();
            boards.push(BoardRecording::from_rows(
                *board_id,
                index * BOARD_WIDTH,
                &board_rows,
            )?);
        }

        let (start, end) = common_range(&boards)?;
        let axis = uniform_axis(start, end, config.period_ms);
        let samples = align_boards(&boards, &axis);

        let noise = NoiseBaseline::capture(&samples).ok_or(Error::NoCommonTimeRange)?;
        let pressure = Denoiser::new(config.denoise_radius).denoise(&samples, &noise);

        let name = name.into();
        tracing::debug!(
            name = %name,
            frames = pressure.len(),
            period_ms = config.period_ms,
            "assembled floor recording"
        );

        Ok(Self {
            id: RecordingId::new(),
            name,
            period_ms: config.period_ms,
            samples,
            noise,
            pressure,
        })
    }

    pub fn id(&self) -> RecordingId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period_ms(&self) -> i64 {
        self.period_ms
    }

    pub fn period_secs(&self) -> f64 {
        self.period_ms as f64 / 1_000.0
    }

    /// The aligned grid before denoising.
    pub fn samples(&self) -> &PressureGrid {
        &self.samples
    }

    pub fn noise(&self) -> &NoiseBaseline {
        &self.noise
    }

    /// The denoised pressure grid all downstream gait analysis reads from.
    pub fn pressure(&self) -> &PressureGrid {
        &self.pressure
    }

    /// Restrict the recording to timestamps within `[start, end]`.
    ///
    /// The noise baseline is kept as captured; it describes the unloaded
    /// floor, not the trimmed window.
    pub fn trim(&self, start: Timestamp, end: Timestamp) -> FloorRecording {
        FloorRecording {
            id: self.id,
            name: self.name.clone(),
            period_ms: self.period_ms,
            samples: self.samples.slice_time(start, end),
            noise: self.noise.clone(),
            pressure: self.pressure.slice_time(start, end),
        }
    }
}
