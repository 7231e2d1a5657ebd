//! Footstep event detection from COP speed.
//!
//! Two kinds of events are read off the speed series:
//!
//! - **Anchors**: local minima of heavily smoothed COP speed, marking the
//!   quasi-static support phase while one foot carries the weight.
//! - **Weight shifts**: local maxima of the smoothed rate-of-change of
//!   speed, marking the transfer of weight onto the next foot.
//!
//! An anchor only becomes a footstep if the subject shifts weight off that
//! support before settling into the next one.

use smartfloor_core::series::{centered_mean, local_maxima, local_minima};

/// Candidate support phases: indices of strict local minima of the smoothed
/// speed series.
pub fn find_anchors(speed: &[Option<f64>], window: usize, order: usize) -> Vec<usize> {
    let smoothed = centered_mean(speed, window);
    local_minima(&smoothed, order)
}

/// Candidate weight shifts: indices of strict local maxima of the smoothed
/// speed rate-of-change, kept only above the activity threshold.
pub fn find_weight_shifts(
    speed_roc: &[Option<f64>],
    window: usize,
    order: usize,
    threshold: f64,
) -> Vec<usize> {
    let smoothed = centered_mean(speed_roc, window);
    local_maxima(&smoothed, order)
        .into_iter()
        .filter(|&i| smoothed[i].is_some_and(|v| v > threshold))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Anchor,
    Shift,
}

/// Promote anchors to footsteps.
///
/// Both event kinds are merged into one timeline; an anchor is valid only
/// when the event immediately after it is a weight shift. The final anchor
/// of a recording has no following shift and is discarded.
pub fn pair_into_footsteps(anchors: &[usize], shifts: &[usize]) -> Vec<usize> {
    let mut timeline: Vec<(usize, EventKind)> = anchors
        .iter()
        .map(|&i| (i, EventKind::Anchor))
        .chain(shifts.iter().map(|&i| (i, EventKind::Shift)))
        .collect();
    // An anchor and a shift on the same frame count as shift-after-anchor.
    timeline.sort_by_key(|&(i, kind)| (i, kind != EventKind::Anchor));

    timeline
        .windows(2)
        .filter(|pair| pair[0].1 == EventKind::Anchor && pair[1].1 == EventKind::Shift)
        .map(|pair| pair[0].0)
        .collect()
}
