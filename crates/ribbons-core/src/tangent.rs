use glam::DVec2;

use crate::history::NodeHistory;

/// Direction of the segment `from -> to`, in radians.
#[inline]
pub fn segment_angle(from: DVec2, to: DVec2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Local ribbon direction at node `i`.
///
/// The head has no predecessor, so it looks forward at node 1; every other
/// node looks back at node `i - 1`. Both point from newer to older. Needs at
/// least two nodes.
#[inline]
pub fn tangent_angle(history: &NodeHistory, i: usize) -> f64 {
    if i == 0 {
        segment_angle(history.node(0), history.node(1))
    } else {
        segment_angle(history.node(i - 1), history.node(i))
    }
}
