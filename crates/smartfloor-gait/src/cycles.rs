//! Gait cycles: spans of three consecutive alternating footsteps.

use smartfloor_core::{Result, Timestamp};

use crate::analysis::GaitAnalysis;
use crate::features::{CycleFeatures, FeatureVector};

/// One gait cycle of a recording, from the first to the third footstep of a
/// lead-foot triplet.
///
/// A cycle holds a non-owning reference back to its analysis; full
/// resolution series stay with the recording and are read lazily when
/// features or distances are computed. Consecutive cycles overlap: one
/// cycle's closing footstep is the next cycle's opening one.
#[derive(Debug, Clone, Copy)]
pub struct GaitCycle<'a> {
    analysis: &'a GaitAnalysis,
    start: Timestamp,
    end: Timestamp,
}

impl<'a> GaitCycle<'a> {
    pub fn new(analysis: &'a GaitAnalysis, start: Timestamp, end: Timestamp) -> Self {
        Self {
            analysis,
            start,
            end,
        }
    }

    pub fn analysis(&self) -> &'a GaitAnalysis {
        self.analysis
    }

    pub fn recording_name(&self) -> &'a str {
        self.analysis.recording().name()
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn window(&self) -> (Timestamp, Timestamp) {
        (self.start, self.end)
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end.as_millis() - self.start.as_millis()) as f64 / 1_000.0
    }

    /// Phase-normalized MLAP position and velocity for this cycle.
    ///
    /// `Err` marks a degenerate walking line; `Ok(None)` marks a cycle
    /// whose window contains undefined samples or no net forward travel.
    pub fn features(&self) -> Result<Option<CycleFeatures>> {
        let pos = self.analysis.cop_mlap()?;
        let vel = self.analysis.velocity_mlap()?;
        Ok(CycleFeatures::from_series(
            self.analysis.times(),
            &pos,
            &vel,
            self.start,
            self.end,
            self.analysis.config().cycle_samples,
        ))
    }

    /// The flat feature vector used for similarity queries.
    pub fn feature_vector(&self) -> Result<Option<FeatureVector>> {
        Ok(self.features()?.map(|f| f.to_vector()))
    }

    /// Motion-similarity distance to another cycle.
    pub fn distance(&self, other: &GaitCycle<'_>) -> Result<Option<f64>> {
        let a = self.features()?;
        let b = other.features()?;
        Ok(match (a, b) {
            (Some(a), Some(b)) => a.distance(&b),
            _ => None,
        })
    }
}
