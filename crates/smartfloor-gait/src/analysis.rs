//! Lazy, memoized gait analysis over one floor recording.

use std::cell::OnceCell;

use smartfloor_core::series::centered_mean;
use smartfloor_core::{
    CopSample, Error, Foot, Footstep, Mlap, MlapFrame, Result, Timestamp, Vec2, WalkLine,
};
use smartfloor_grid::FloorRecording;

use crate::classify::{classify_positions, enforce_alternation};
use crate::cop::{cop_series, derivative, magnitudes, positions};
use crate::cycles::GaitCycle;
use crate::events::{find_anchors, find_weight_shifts, pair_into_footsteps};

/// Tuning parameters for event detection and cycle normalization.
///
/// The weight-shift threshold has no defensible universal default: its
/// scale depends on the sampling period and smoothing windows, so it must
/// be chosen per deployment and is a required constructor argument.
#[derive(Debug, Clone)]
pub struct GaitConfig {
    /// Minimum smoothed rate-of-change of speed, in tiles/s², for a local
    /// maximum to count as a weight shift
    pub shift_threshold: f64,
    /// Centered smoothing window over speed before anchor detection
    pub anchor_window: usize,
    /// Centered smoothing window over the speed rate-of-change before
    /// weight-shift detection
    pub shift_window: usize,
    /// One-sided neighborhood for strict local-extrema detection
    pub extrema_order: usize,
    /// The foot a gait cycle starts and ends on
    pub lead_foot: Foot,
    /// Number of evenly spaced phase points per normalized cycle
    pub cycle_samples: usize,
}

impl GaitConfig {
    pub fn new(shift_threshold: f64) -> Self {
        Self {
            shift_threshold,
            anchor_window: 10,
            shift_window: 3,
            extrema_order: 3,
            lead_foot: Foot::Right,
            cycle_samples: 40,
        }
    }

    pub fn with_smoothing(mut self, anchor_window: usize, shift_window: usize) -> Self {
        self.anchor_window = anchor_window;
        self.shift_window = shift_window;
        self
    }

    pub fn with_extrema_order(mut self, order: usize) -> Self {
        self.extrema_order = order;
        self
    }

    pub fn with_lead_foot(mut self, foot: Foot) -> Self {
        self.lead_foot = foot;
        self
    }

    pub fn with_cycle_samples(mut self, samples: usize) -> Self {
        self.cycle_samples = samples;
        self
    }
}

/// Derived gait series for one recording, computed on demand and memoized.
///
/// Each derived series is cached in an explicit cell the first time it is
/// requested. Changing the configuration goes through [`reconfigure`],
/// which returns a fresh analysis with empty caches; caches are never
/// invalidated in place. The cells are single-threaded by construction, so
/// sharing one analysis across threads without synchronization is rejected
/// at compile time.
///
/// [`reconfigure`]: GaitAnalysis::reconfigure
#[derive(Debug)]
pub struct GaitAnalysis {
    recording: FloorRecording,
    config: GaitConfig,
    cop: OnceCell<Vec<Option<CopSample>>>,
    velocity: OnceCell<Vec<Option<Vec2>>>,
    acceleration: OnceCell<Vec<Option<Vec2>>>,
    jerk: OnceCell<Vec<Option<Vec2>>>,
    speed: OnceCell<Vec<Option<f64>>>,
    speed_roc: OnceCell<Vec<Option<f64>>>,
    footsteps: OnceCell<Vec<Footstep>>,
}

impl GaitAnalysis {
    pub fn new(recording: FloorRecording, config: GaitConfig) -> Self {
        Self {
            recording,
            config,
            cop: OnceCell::new(),
            velocity: OnceCell::new(),
            acceleration: OnceCell::new(),
            jerk: OnceCell::new(),
            speed: OnceCell::new(),
            speed_roc: OnceCell::new(),
            footsteps: OnceCell::new(),
        }
    }

    /// Replace the configuration, dropping every cached series.
    pub fn reconfigure(self, config: GaitConfig) -> Self {
        Self::new(self.recording, config)
    }

    pub fn recording(&self) -> &FloorRecording {
        &self.recording
    }

    pub fn config(&self) -> &GaitConfig {
        &self.config
    }

    /// The time axis all derived series are aligned to.
    pub fn times(&self) -> &[Timestamp] {
        self.recording.pressure().times()
    }

    /// Center of pressure per frame; `None` where the floor is unloaded.
    pub fn cop(&self) -> &[Option<CopSample>] {
        self.cop
            .get_or_init(|| cop_series(self.recording.pressure()))
    }

    /// COP velocity in tiles/s.
    pub fn velocity(&self) -> &[Option<Vec2>] {
        self.velocity.get_or_init(|| {
            derivative(&positions(self.cop()), self.recording.period_secs())
        })
    }

    /// COP acceleration in tiles/s².
    pub fn acceleration(&self) -> &[Option<Vec2>] {
        self.acceleration
            .get_or_init(|| derivative(self.velocity(), self.recording.period_secs()))
    }

    /// COP jerk in tiles/s³.
    pub fn jerk(&self) -> &[Option<Vec2>] {
        self.jerk
            .get_or_init(|| derivative(self.acceleration(), self.recording.period_secs()))
    }

    /// Scalar COP speed in tiles/s.
    pub fn speed(&self) -> &[Option<f64>] {
        self.speed.get_or_init(|| magnitudes(self.velocity()))
    }

    /// Rate of change of speed in tiles/s²: acceleration along the
    /// direction of motion, used for weight-shift detection.
    pub fn speed_roc(&self) -> &[Option<f64>] {
        self.speed_roc
            .get_or_init(|| derivative(self.speed(), self.recording.period_secs()))
    }

    /// Validated, labeled footsteps in time order, strictly alternating.
    pub fn footsteps(&self) -> &[Footstep] {
        self.footsteps.get_or_init(|| {
            let anchors = find_anchors(
                self.speed(),
                self.config.anchor_window,
                self.config.extrema_order,
            );
            let shifts = find_weight_shifts(
                self.speed_roc(),
                self.config.shift_window,
                self.config.extrema_order,
                self.config.shift_threshold,
            );
            let step_indices = pair_into_footsteps(&anchors, &shifts);

            let cop = self.cop();
            let times = self.times();
            let samples: Vec<(Timestamp, CopSample)> = step_indices
                .iter()
                .filter_map(|&i| cop[i].map(|s| (times[i], s)))
                .collect();

            let step_positions: Vec<Vec2> =
                samples.iter().map(|(_, s)| s.position).collect();
            let feet = classify_positions(&step_positions);

            let labeled: Vec<Footstep> = samples
                .into_iter()
                .zip(feet)
                .filter_map(|((time, sample), foot)| {
                    foot.map(|foot| {
                        Footstep::new(time, sample.position, sample.magnitude, foot)
                    })
                })
                .collect();

            let steps = enforce_alternation(labeled);
            tracing::debug!(
                recording = %self.recording.name(),
                footsteps = steps.len(),
                "detected footsteps"
            );
            steps
        })
    }

    /// The subject's overall straight trajectory: from the mean of the
    /// first two footsteps to the mean of the last two.
    pub fn walk_line(&self) -> Result<WalkLine> {
        let steps = self.footsteps();
        if steps.len() < 2 {
            return Err(Error::InsufficientData {
                required: 2,
                available: steps.len(),
            });
        }

        let mean2 = |a: &Footstep, b: &Footstep| {
            Vec2::new(
                (a.position.x + b.position.x) / 2.0,
                (a.position.y + b.position.y) / 2.0,
            )
        };
        let start = mean2(&steps[0], &steps[1]);
        let end = mean2(&steps[steps.len() - 2], &steps[steps.len() - 1]);
        Ok(WalkLine::new(start, end))
    }

    /// Rotation onto the walking line's mediolateral/anteroposterior axes.
    pub fn mlap_frame(&self) -> Result<MlapFrame> {
        MlapFrame::from_walk_line(&self.walk_line()?)
    }

    /// COP positions in line-relative coordinates.
    pub fn cop_mlap(&self) -> Result<Vec<Option<Mlap>>> {
        let frame = self.mlap_frame()?;
        Ok(self
            .cop()
            .iter()
            .map(|s| s.map(|s| frame.project_position(s.position)))
            .collect())
    }

    /// COP velocity in line-relative coordinates.
    pub fn velocity_mlap(&self) -> Result<Vec<Option<Mlap>>> {
        let frame = self.mlap_frame()?;
        Ok(self
            .velocity()
            .iter()
            .map(|v| v.map(|v| frame.project_vector(v)))
            .collect())
    }

    /// Overlapping triplets of footsteps starting on the configured lead
    /// foot, each spanning one gait cycle.
    pub fn cycles(&self) -> Vec<GaitCycle<'_>> {
        self.footsteps()
            .windows(3)
            .filter(|w| w[0].foot == self.config.lead_foot)
            .map(|w| GaitCycle::new(self, w[0].time, w[2].time))
            .collect()
    }

    /// The span in which the floor actually carries load: the first to the
    /// last frame whose COP magnitude exceeds the recording mean.
    pub fn loaded_window(&self) -> Option<(Timestamp, Timestamp)> {
        let cop = self.cop();
        let defined: Vec<(usize, f64)> = cop
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|s| (i, s.magnitude)))
            .collect();
        if defined.is_empty() {
            return None;
        }

        let mean = defined.iter().map(|(_, m)| m).sum::<f64>() / defined.len() as f64;
        let loaded: Vec<usize> = defined
            .iter()
            .filter(|(_, m)| *m > mean)
            .map(|(i, _)| *i)
            .collect();

        let times = self.times();
        match (loaded.first(), loaded.last()) {
            (Some(&lo), Some(&hi)) => Some((times[lo], times[hi])),
            _ => None,
        }
    }

    /// Smoothed speed series as seen by the anchor detector.
    pub fn smoothed_speed(&self) -> Vec<Option<f64>> {
        centered_mean(self.speed(), self.config.anchor_window)
    }
}
