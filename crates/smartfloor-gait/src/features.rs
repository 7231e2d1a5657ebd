//! Cycle-normalized motion features.
//!
//! Every gait cycle is resampled onto a fixed number of evenly spaced phase
//! points and scaled into cycle-relative units, so cycles of different
//! durations and walking speeds become directly comparable:
//!
//! - mediolateral values are scaled by twice their maximum absolute
//!   deviation within the cycle;
//! - anteroposterior position is re-zeroed at the cycle start and scaled by
//!   the net anteroposterior displacement, running 0 to 1 across the cycle;
//! - anteroposterior velocity stays in physical units (tiles/s).

use serde::{Deserialize, Serialize};
use smartfloor_core::{Mlap, Timestamp};

/// Flat numeric form of one cycle's features, in the order
/// `[vel.ml, vel.ap, pos.ml, pos.ap]`, each of cycle-sample length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Normalized MLAP position and velocity of one cycle, resampled to a
/// fixed number of phase points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleFeatures {
    pos: Vec<Mlap>,
    vel: Vec<Mlap>,
}

impl CycleFeatures {
    /// Resample and normalize a cycle window out of full-resolution series.
    ///
    /// Returns `None` when the window cannot be resampled (undefined
    /// samples inside it, fewer than two phase points) or when the cycle
    /// has no net anteroposterior displacement to normalize by.
    pub fn from_series(
        times: &[Timestamp],
        pos: &[Option<Mlap>],
        vel: &[Option<Mlap>],
        start: Timestamp,
        end: Timestamp,
        samples: usize,
    ) -> Option<Self> {
        let pos = resample_window(times, pos, start, end, samples)?;
        let vel = resample_window(times, vel, start, end, samples)?;
        Self::normalize(pos, vel)
    }

    fn normalize(pos: Vec<Mlap>, vel: Vec<Mlap>) -> Option<Self> {
        let ap0 = pos.first()?.ap;
        let net_ap = pos.last()?.ap - ap0;
        if net_ap.abs() < 1e-12 {
            return None;
        }

        let pos_ml_scale = ml_scale(&pos);
        let vel_ml_scale = ml_scale(&vel);

        let pos = pos
            .into_iter()
            .map(|p| Mlap::new(p.ml * pos_ml_scale, (p.ap - ap0) / net_ap))
            .collect();
        let vel = vel
            .into_iter()
            .map(|v| Mlap::new(v.ml * vel_ml_scale, v.ap))
            .collect();

        Some(Self { pos, vel })
    }

    pub fn positions(&self) -> &[Mlap] {
        &self.pos
    }

    pub fn velocities(&self) -> &[Mlap] {
        &self.vel
    }

    pub fn to_vector(&self) -> FeatureVector {
        let mut out = Vec::with_capacity(4 * self.pos.len());
        out.extend(self.vel.iter().map(|v| v.ml));
        out.extend(self.vel.iter().map(|v| v.ap));
        out.extend(self.pos.iter().map(|p| p.ml));
        out.extend(self.pos.iter().map(|p| p.ap));
        FeatureVector(out)
    }

    /// Motion-similarity distance between two normalized cycles.
    ///
    /// Position differences are summed across phase points so that error
    /// accumulates, while velocity differences are averaged; the asymmetry
    /// weights sustained positional deviation over transient velocity
    /// mismatch. `None` when the cycles were normalized to different phase
    /// resolutions.
    pub fn distance(&self, other: &Self) -> Option<f64> {
        if self.pos.len() != other.pos.len() || self.pos.is_empty() {
            return None;
        }

        let pos_term: f64 = self
            .pos
            .iter()
            .zip(&other.pos)
            .map(|(a, b)| a.distance_to(b))
            .sum();
        let vel_term: f64 = self
            .vel
            .iter()
            .zip(&other.vel)
            .map(|(a, b)| a.distance_to(b))
            .sum::<f64>()
            / self.vel.len() as f64;

        Some(pos_term + vel_term)
    }
}

fn ml_scale(series: &[Mlap]) -> f64 {
    let ml_max = series.iter().map(|s| s.ml.abs()).fold(0.0, f64::max);
    if ml_max > 0.0 {
        1.0 / (2.0 * ml_max)
    } else {
        1.0
    }
}

/// Linearly resample a window of an MLAP series onto `samples` evenly
/// spaced instants spanning `[start, end]` inclusive.
///
/// `None` when any required sample is undefined or the window is empty.
pub fn resample_window(
    times: &[Timestamp],
    series: &[Option<Mlap>],
    start: Timestamp,
    end: Timestamp,
    samples: usize,
) -> Option<Vec<Mlap>> {
    if samples < 2 || end <= start {
        return None;
    }

    let start_ms = start.as_millis() as f64;
    let end_ms = end.as_millis() as f64;
    let span = end_ms - start_ms;

    (0..samples)
        .map(|j| {
            let phase = j as f64 / (samples - 1) as f64;
            interp_at(times, series, start_ms + span * phase)
        })
        .collect()
}

fn interp_at(times: &[Timestamp], series: &[Option<Mlap>], at_ms: f64) -> Option<Mlap> {
    if times.is_empty()
        || at_ms < times[0].as_millis() as f64
        || at_ms > times[times.len() - 1].as_millis() as f64
    {
        return None;
    }

    let after = times.partition_point(|t| (t.as_millis() as f64) < at_ms);
    if after < times.len() && times[after].as_millis() as f64 == at_ms {
        return series[after];
    }

    let (i0, i1) = (after - 1, after);
    let (a, b) = (series[i0]?, series[i1]?);
    let t0 = times[i0].as_millis() as f64;
    let t1 = times[i1].as_millis() as f64;
    let alpha = (at_ms - t0) / (t1 - t0);
    Some(Mlap::new(
        a.ml + alpha * (b.ml - a.ml),
        a.ap + alpha * (b.ap - a.ap),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(n: usize) -> Vec<Timestamp> {
        (0..n).map(|i| Timestamp::from_millis(i as i64 * 40)).collect()
    }

    fn ramp_series(n: usize) -> Vec<Option<Mlap>> {
        // ml oscillates, ap advances steadily.
        (0..n)
            .map(|i| {
                let phase = i as f64 * 0.7;
                Some(Mlap::new(0.4 * phase.sin(), i as f64 * 0.25))
            })
            .collect()
    }

    #[test]
    fn test_resample_boundaries_match_source() {
        let times = axis(20);
        let series = ramp_series(20);
        let start = times[2];
        let end = times[17];

        let resampled = resample_window(&times, &series, start, end, 40).unwrap();
        let first = series[2].unwrap();
        let last = series[17].unwrap();

        assert!((resampled[0].ml - first.ml).abs() < 1e-9);
        assert!((resampled[0].ap - first.ap).abs() < 1e-9);
        assert!((resampled[39].ml - last.ml).abs() < 1e-9);
        assert!((resampled[39].ap - last.ap).abs() < 1e-9);
    }

    #[test]
    fn test_resample_hits_gaps() {
        let times = axis(20);
        let mut series = ramp_series(20);
        series[10] = None;
        assert!(resample_window(&times, &series, times[2], times[17], 40).is_none());
    }

    #[test]
    fn test_normalized_ranges() {
        let times = axis(20);
        let series = ramp_series(20);
        let vel = ramp_series(20);
        let features =
            CycleFeatures::from_series(&times, &series, &vel, times[0], times[19], 40).unwrap();

        for p in features.positions() {
            assert!(p.ml.abs() <= 0.5 + 1e-9);
        }
        assert!(features.positions()[0].ap.abs() < 1e-9);
        assert!((features.positions()[39].ap - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_net_displacement_is_undefined() {
        let times = axis(20);
        let flat: Vec<Option<Mlap>> =
            (0..20).map(|i| Some(Mlap::new((i as f64).sin(), 3.0))).collect();
        assert!(
            CycleFeatures::from_series(&times, &flat, &flat, times[0], times[19], 40).is_none()
        );
    }

    #[test]
    fn test_features_invariant_to_spatial_scale() {
        let times = axis(20);
        let series = ramp_series(20);
        let scaled: Vec<Option<Mlap>> = series
            .iter()
            .map(|s| s.map(|s| Mlap::new(s.ml * 3.0, s.ap * 3.0)))
            .collect();

        let a = CycleFeatures::from_series(&times, &series, &series, times[0], times[19], 40)
            .unwrap();
        let b = CycleFeatures::from_series(&times, &scaled, &series, times[0], times[19], 40)
            .unwrap();

        for (p, q) in a.positions().iter().zip(b.positions()) {
            assert!((p.ml - q.ml).abs() < 1e-9);
            assert!((p.ap - q.ap).abs() < 1e-9);
        }
    }

    #[test]
    fn test_distance_of_identical_cycles_is_zero() {
        let times = axis(20);
        let series = ramp_series(20);
        let f = CycleFeatures::from_series(&times, &series, &series, times[0], times[19], 40)
            .unwrap();
        assert!(f.distance(&f).unwrap() < 1e-12);
    }

    #[test]
    fn test_distance_rejects_mismatched_resolutions() {
        let times = axis(20);
        let series = ramp_series(20);
        let a = CycleFeatures::from_series(&times, &series, &series, times[0], times[19], 40)
            .unwrap();
        let b = CycleFeatures::from_series(&times, &series, &series, times[0], times[19], 20)
            .unwrap();
        assert!(a.distance(&b).is_none());
    }

    #[test]
    fn test_feature_vector_layout() {
        let times = axis(20);
        let series = ramp_series(20);
        let f = CycleFeatures::from_series(&times, &series, &series, times[0], times[19], 40)
            .unwrap();
        let vector = f.to_vector();
        assert_eq!(vector.len(), 160);
        assert_eq!(vector.as_slice()[80], f.positions()[0].ml);
    }
}
