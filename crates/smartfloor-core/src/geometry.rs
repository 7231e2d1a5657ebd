//! Planar geometry for walking-line and gait-axis computations.

use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Vec2;

/// The straight overall trajectory of a walking subject across the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkLine {
    pub start: Vec2,
    pub end: Vec2,
}

impl WalkLine {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().magnitude()
    }
}

/// Coordinate in the walking-line frame: mediolateral (perpendicular to the
/// line) and anteroposterior (along the line).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mlap {
    pub ml: f64,
    pub ap: f64,
}

impl Mlap {
    pub fn new(ml: f64, ap: f64) -> Self {
        Self { ml, ap }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dml = self.ml - other.ml;
        let dap = self.ap - other.ap;
        (dml * dml + dap * dap).sqrt()
    }
}

/// Rotation (plus origin) that re-expresses floor coordinates in the
/// mediolateral/anteroposterior frame of a walking line.
///
/// Built by rotating the line's 90-degrees-clockwise normal onto the x axis,
/// so the line itself maps onto the y (anteroposterior) axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MlapFrame {
    origin: Vec2,
    rotation: Matrix2<f64>,
}

impl MlapFrame {
    /// Construct the frame for a walking line.
    ///
    /// A line of zero length has no orientation; this is a fatal error rather
    /// than a silently degenerate rotation.
    pub fn from_walk_line(line: &WalkLine) -> Result<Self> {
        let v_line = line.direction();
        let norm = v_line.magnitude();
        if norm < f64::EPSILON {
            return Err(Error::DegenerateWalkLine);
        }

        // Clockwise normal of the line, as a unit vector
        let c = v_line.y / norm;
        let s = -v_line.x / norm;

        Ok(Self {
            origin: line.start,
            rotation: Matrix2::new(c, s, -s, c),
        })
    }

    /// Project an absolute floor position into line-relative coordinates,
    /// with the origin at the start of the walking line.
    pub fn project_position(&self, p: Vec2) -> Mlap {
        self.project_vector(p - self.origin)
    }

    /// Project a direction/derivative vector; rotation only, no translation.
    pub fn project_vector(&self, v: Vec2) -> Mlap {
        let rotated = self.rotation * v.to_nalgebra();
        Mlap::new(rotated.x, rotated.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_walk_line() {
        let line = WalkLine::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        assert!(matches!(
            MlapFrame::from_walk_line(&line),
            Err(Error::DegenerateWalkLine)
        ));
    }

    #[test]
    fn test_line_start_maps_to_origin() {
        let line = WalkLine::new(Vec2::new(2.0, 3.0), Vec2::new(10.0, 3.0));
        let frame = MlapFrame::from_walk_line(&line).unwrap();

        let at_start = frame.project_position(line.start);
        assert!(at_start.ml.abs() < 1e-12);
        assert!(at_start.ap.abs() < 1e-12);
    }

    #[test]
    fn test_line_end_is_pure_anteroposterior() {
        let line = WalkLine::new(Vec2::new(2.0, 3.0), Vec2::new(10.0, 9.0));
        let frame = MlapFrame::from_walk_line(&line).unwrap();

        let at_end = frame.project_position(line.end);
        assert!(at_end.ml.abs() < 1e-9);
        assert!((at_end.ap - line.length()).abs() < 1e-9);
    }

    #[test]
    fn test_projection_invariant_under_translation() {
        let line = WalkLine::new(Vec2::new(1.0, 2.0), Vec2::new(7.0, 5.0));
        let frame = MlapFrame::from_walk_line(&line).unwrap();

        let offset = Vec2::new(-3.5, 12.25);
        let shifted = WalkLine::new(line.start + offset, line.end + offset);
        let shifted_frame = MlapFrame::from_walk_line(&shifted).unwrap();

        let p = Vec2::new(4.0, 4.0);
        let a = frame.project_position(p);
        let b = shifted_frame.project_position(p + offset);
        assert!((a.ml - b.ml).abs() < 1e-9);
        assert!((a.ap - b.ap).abs() < 1e-9);
    }

    #[test]
    fn test_projection_invariant_under_rotation() {
        // Rotating the whole floor (line and points together) must not change
        // line-relative coordinates.
        let line = WalkLine::new(Vec2::new(1.0, 1.0), Vec2::new(9.0, 4.0));
        let frame = MlapFrame::from_walk_line(&line).unwrap();

        let theta: f64 = 0.7;
        let rotate = |v: Vec2| {
            Vec2::new(
                v.x * theta.cos() - v.y * theta.sin(),
                v.x * theta.sin() + v.y * theta.cos(),
            )
        };

        let rotated_line = WalkLine::new(rotate(line.start), rotate(line.end));
        let rotated_frame = MlapFrame::from_walk_line(&rotated_line).unwrap();

        let p = Vec2::new(5.0, 2.5);
        let a = frame.project_position(p);
        let b = rotated_frame.project_position(rotate(p));
        assert!((a.ml - b.ml).abs() < 1e-9);
        assert!((a.ap - b.ap).abs() < 1e-9);
    }

    #[test]
    fn test_right_of_travel_is_positive_mediolateral() {
        // Walking along +x: a point at larger y sits to the subject's left.
        let line = WalkLine::new(Vec2::zero(), Vec2::new(10.0, 0.0));
        let frame = MlapFrame::from_walk_line(&line).unwrap();

        let left = frame.project_position(Vec2::new(5.0, 1.0));
        let right = frame.project_position(Vec2::new(5.0, -1.0));
        assert!(left.ml < 0.0);
        assert!(right.ml > 0.0);
    }
}
