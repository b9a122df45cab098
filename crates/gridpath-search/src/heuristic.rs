use gridpath_core::Point;

/// Weight of a vertical step relative to a horizontal one in [`estimate`].
pub const VERTICAL_WEIGHT: f64 = 1.2;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// A* estimate of the remaining cost from `from` to `to`: Manhattan distance
/// with the vertical component weighted by [`VERTICAL_WEIGHT`].
///
/// This overestimates vertical moves under unit step cost, so A* paths are
/// not guaranteed to be shortest.
#[inline]
pub fn estimate(from: Point, to: Point) -> f64 {
    f64::from((from.x - to.x).abs()) + f64::from((from.y - to.y).abs()) * VERTICAL_WEIGHT
}
