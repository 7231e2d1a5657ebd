//! Fundamental types for the smartfloor gait analysis system.

use chrono::{DateTime, Utc};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a floor recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordingId(pub Uuid);

impl RecordingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp wrapper with millisecond precision (Unix epoch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

/// 2D vector in floor tile units, used for positions and their derivatives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate 90 degrees counter-clockwise
    pub fn perp_ccw(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn to_nalgebra(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn from_nalgebra(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Which foot a footstep belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub fn opposite(&self) -> Foot {
        match self {
            Foot::Left => Foot::Right,
            Foot::Right => Foot::Left,
        }
    }
}

/// Center of pressure at one instant: weighted centroid plus total load.
///
/// A frame with zero total pressure has no defined center; such frames are
/// represented as `None` wherever a `CopSample` would appear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopSample {
    pub position: Vec2,
    pub magnitude: f64,
}

impl CopSample {
    pub fn new(position: Vec2, magnitude: f64) -> Self {
        Self {
            position,
            magnitude,
        }
    }
}

/// A detected footstep: the center of pressure at a quasi-static support
/// phase, labeled with the supporting foot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footstep {
    pub time: Timestamp,
    pub position: Vec2,
    pub magnitude: f64,
    pub foot: Foot,
}

impl Footstep {
    pub fn new(time: Timestamp, position: Vec2, magnitude: f64, foot: Foot) -> Self {
        Self {
            time,
            position,
            magnitude,
            foot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_seconds() {
        let t = Timestamp::from_millis(2_500);
        assert!((t.as_secs_f64() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_magnitude() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_perp_ccw() {
        let v = Vec2::new(1.0, 0.0);
        let p = v.perp_ccw();
        assert!((p.x - 0.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_foot_opposite() {
        assert_eq!(Foot::Left.opposite(), Foot::Right);
        assert_eq!(Foot::Right.opposite(), Foot::Left);
    }
}
