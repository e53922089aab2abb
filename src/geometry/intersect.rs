use nalgebra::Point2;

/// Cross products below this magnitude are treated as parallel lines.
pub const PARALLEL_EPS: f64 = 1e-8;

/// Intersection of the infinite lines `o1 → p1` and `o2 → p2`.
///
/// Returns `None` for parallel (or degenerate) lines; this is an expected
/// outcome and not an error.
pub fn intersect(
    o1: Point2<f64>,
    p1: Point2<f64>,
    o2: Point2<f64>,
    p2: Point2<f64>,
) -> Option<Point2<f64>> {
    let x = o2 - o1;
    let d1 = p1 - o1;
    let d2 = p2 - o2;

    let cross = d1.perp(&d2);
    if cross.abs() < PARALLEL_EPS {
        return None;
    }

    let t1 = x.perp(&d2) / cross;
    Some(o1 + d1 * t1)
}
