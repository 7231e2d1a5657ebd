//! Left/right labeling of footsteps.
//!
//! Walking alternates feet, and each step lands on the outer side of the
//! body's line of travel. For three consecutive steps, the turning sign of
//! the stride vector against the step vector tells which side the middle
//! step landed on.

use smartfloor_core::{Foot, Footstep, Vec2};

/// Label the middle step of a triplet.
fn middle_foot(p1: Vec2, p2: Vec2, p3: Vec2) -> Foot {
    let v_step = p2 - p1;
    let v_stride = p3 - p1;
    if v_stride.dot(&v_step.perp_ccw()) > 0.0 {
        Foot::Right
    } else {
        Foot::Left
    }
}

/// Labels for a footstep position sequence.
///
/// Interior steps are labeled by the sliding-triplet rule; the first and
/// last steps take the opposite label of their nearest classified neighbor.
/// Sequences of fewer than three steps cannot be labeled at all.
pub fn classify_positions(positions: &[Vec2]) -> Vec<Option<Foot>> {
    let n = positions.len();
    let mut feet = vec![None; n];
    if n < 3 {
        return feet;
    }

    for i in 1..n - 1 {
        feet[i] = Some(middle_foot(positions[i - 1], positions[i], positions[i + 1]));
    }
    feet[0] = feet[1].map(|f| f.opposite());
    feet[n - 1] = feet[n - 2].map(|f| f.opposite());
    feet
}

/// Drop any footstep that repeats its predecessor's label, leaving a
/// strictly alternating sequence.
pub fn enforce_alternation(steps: Vec<Footstep>) -> Vec<Footstep> {
    let mut out: Vec<Footstep> = Vec::with_capacity(steps.len());
    for step in steps {
        match out.last() {
            Some(prev) if prev.foot == step.foot => {
                tracing::debug!(time = step.time.as_millis(), "dropped repeated-foot step");
            }
            _ => out.push(step),
        }
    }
    out
}
