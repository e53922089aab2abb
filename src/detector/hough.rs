//! Standard Hough transform over a binary edge map, via
//! `imageproc::hough::detect_lines`.
//!
//! ρ is quantized to 1 px (truncated toward zero) and θ to 1°. Peaks are
//! kept only if they are the maximum of their 3×3 accumulator neighbourhood.
//! Lines come back in scan order (θ-major) without vote counts.
use crate::geometry::LineSegment;
use image::GrayImage;
use imageproc::hough::{detect_lines, LineDetectionOptions};

pub use imageproc::hough::PolarLine;

/// Half-width of the non-maximum suppression window.
pub const SUPPRESSION_RADIUS: u32 = 1;

/// Lines with more than `vote` votes.
pub fn standard_lines(edges: &GrayImage, vote: u32) -> Vec<PolarLine> {
    let options = LineDetectionOptions {
        vote_threshold: vote.saturating_add(1),
        suppression_radius: SUPPRESSION_RADIUS,
    };
    detect_lines(edges, options)
}

pub fn theta_rad(line: &PolarLine) -> f64 {
    (line.angle_in_degrees as f64).to_radians()
}

/// Normals between 45° and 81°, or between 99° and 135° (exclusive):
/// lines leaning 9°–45° off the horizontal, either way.
pub fn in_lane_band(line: &PolarLine) -> bool {
    matches!(line.angle_in_degrees, 46..=80 | 100..=134)
}

/// Segment between row 0 and row `rows`. `None` for lines that never
/// cross a row (horizontal normals of 90°).
pub fn span_rows(line: &PolarLine, rows: u32) -> Option<LineSegment> {
    let (sin_t, cos_t) = theta_rad(line).sin_cos();
    if cos_t.abs() < 1e-9 {
        return None;
    }
    let rho = line.r as f64;
    let x_top = rho / cos_t;
    let x_bottom = (rho - rows as f64 * sin_t) / cos_t;
    Some(LineSegment::from_coords(
        x_top as i32,
        0,
        x_bottom as i32,
        rows as i32,
    ))
}
