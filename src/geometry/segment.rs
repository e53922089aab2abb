use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Reasons a geometric quantity cannot be derived from a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Both endpoints coincide, so the segment has no direction.
    DegenerateSegment { at: [i32; 2] },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::DegenerateSegment { at } => {
                write!(f, "degenerate segment at ({}, {})", at[0], at[1])
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Line segment in pixel coordinates of the analyzed region.
///
/// Endpoints are kept in detector order. Use [`LineSegment::oriented`] to get
/// the `(upper, lower)` pair the aggregation stage averages over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl LineSegment {
    pub const fn new(p0: [i32; 2], p1: [i32; 2]) -> Self {
        Self { p0, p1 }
    }

    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new([x1, y1], [x2, y2])
    }

    pub fn start(&self) -> Point2<f64> {
        to_point(self.p0)
    }

    pub fn end(&self) -> Point2<f64> {
        to_point(self.p1)
    }

    /// Endpoint-to-endpoint vector, not normalized.
    pub fn delta(&self) -> Vector2<f64> {
        self.end() - self.start()
    }

    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }

    /// Unit vector from `p0` towards `p1`.
    pub fn direction(&self) -> Result<Vector2<f64>, GeometryError> {
        if self.is_degenerate() {
            return Err(GeometryError::DegenerateSegment { at: self.p0 });
        }
        Ok(self.delta() / self.length())
    }

    pub fn midpoint(&self) -> Point2<f64> {
        Point2::from((self.start().coords + self.end().coords) * 0.5)
    }

    /// Returns `(upper, lower)`: the lower endpoint has the larger row
    /// coordinate. On equal rows the smaller column is upper, so the roles
    /// never depend on endpoint order.
    pub fn oriented(&self) -> ([i32; 2], [i32; 2]) {
        let (a, b) = (self.p0, self.p1);
        if (a[1], a[0]) > (b[1], b[0]) {
            (b, a)
        } else {
            (a, b)
        }
    }

    /// Orientation in degrees as `atan2(y0 - y1, x1 - x0)`, i.e. measured with
    /// the image row axis flipped so that "up" is positive.
    pub fn screen_angle_deg(&self) -> f64 {
        let dy = self.start().y - self.end().y;
        let dx = self.end().x - self.start().x;
        dy.atan2(dx).to_degrees()
    }

    /// Same segment moved down by `rows`, saturating at the `i32` range.
    pub fn shifted(&self, rows: i32) -> Self {
        Self::new(
            [self.p0[0], self.p0[1].saturating_add(rows)],
            [self.p1[0], self.p1[1].saturating_add(rows)],
        )
    }
}

#[inline]
pub(crate) fn to_point(p: [i32; 2]) -> Point2<f64> {
    Point2::new(p[0] as f64, p[1] as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn length_and_midpoint() {
        let seg = LineSegment::from_coords(0, 0, 3, 4);
        assert!(approx_eq(seg.length(), 5.0));
        let mid = seg.midpoint();
        assert!(approx_eq(mid.x, 1.5) && approx_eq(mid.y, 2.0));
    }

    #[test]
    fn direction_is_unit() {
        let seg = LineSegment::from_coords(10, 10, 13, 6);
        let dir = seg.direction().expect("non-degenerate");
        assert!(approx_eq(dir.norm(), 1.0));
        assert!(approx_eq(dir.x, 0.6) && approx_eq(dir.y, -0.8));
    }

    #[test]
    fn zero_length_has_no_direction() {
        let seg = LineSegment::from_coords(7, 7, 7, 7);
        assert_eq!(
            seg.direction(),
            Err(GeometryError::DegenerateSegment { at: [7, 7] })
        );
    }

    #[test]
    fn oriented_puts_larger_row_last() {
        let seg = LineSegment::from_coords(10, 300, 50, 280);
        assert_eq!(seg.oriented(), ([50, 280], [10, 300]));
        let flipped = LineSegment::from_coords(50, 280, 10, 300);
        assert_eq!(flipped.oriented(), ([50, 280], [10, 300]));
    }

    #[test]
    fn oriented_breaks_row_ties_on_column() {
        let forward = LineSegment::from_coords(0, 100, 100, 100);
        let reversed = LineSegment::from_coords(100, 100, 0, 100);
        assert_eq!(forward.oriented(), ([0, 100], [100, 100]));
        assert_eq!(reversed.oriented(), forward.oriented());
    }

    #[test]
    fn midpoint_of_extreme_coordinates_does_not_overflow() {
        let seg = LineSegment::from_coords(i32::MAX - 10, 0, i32::MAX - 5, 100);
        let mid = seg.midpoint();
        assert!(approx_eq(mid.x, i32::MAX as f64 - 7.5));
        assert!(approx_eq(mid.y, 50.0));
    }

    #[test]
    fn shifting_saturates() {
        let seg = LineSegment::from_coords(0, i32::MAX - 1, 5, 10);
        let moved = seg.shifted(5);
        assert_eq!(moved.p0, [0, i32::MAX]);
        assert_eq!(moved.p1, [5, 15]);
    }

    #[test]
    fn screen_angle_uses_upward_rows() {
        let rising = LineSegment::from_coords(0, 10, 10, 0);
        assert!(approx_eq(rising.screen_angle_deg(), 45.0));
        let falling = LineSegment::from_coords(0, 0, 10, 10);
        assert!(approx_eq(falling.screen_angle_deg(), -45.0));
    }
}
