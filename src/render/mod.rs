//! Thick-line rasterization for line masks and lane overlays, on top of
//! `imageproc::drawing`.
//!
//! A stroke of width `thickness` is a filled circle of radius
//! `thickness / 2` stamped on every Bresenham step; width 0 or 1 is a plain
//! line segment. Rendering only reads lane data; nothing here feeds back into
//! the geometric core.
use crate::geometry::LineSegment;
use crate::image::mask::MASK_ON;
use crate::image::MaskU8;
use crate::lanes::{AnalysisRegion, LaneCandidates};
use image::{Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, BresenhamLineIter, Canvas};

/// Overlay color of the selected lane boundaries (yellow).
pub const LANE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const LANE_THICKNESS: u32 = 6;

/// Draws `start → end` with the given stroke width. Only the part inside the
/// canvas is written.
pub fn draw_thick_line_mut<C>(
    canvas: &mut C,
    start: (f32, f32),
    end: (f32, f32),
    thickness: u32,
    color: C::Pixel,
) where
    C: Canvas,
{
    let radius = (thickness / 2) as i32;
    if radius == 0 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }
    let (w, h) = canvas.dimensions();
    let (w, h) = (w as i32, h as i32);
    for (x, y) in BresenhamLineIter::new(start, end) {
        let touches = x.saturating_add(radius) >= 0
            && y.saturating_add(radius) >= 0
            && x.saturating_sub(radius) < w
            && y.saturating_sub(radius) < h;
        if touches {
            draw_filled_circle_mut(canvas, (x, y), radius, color);
        }
    }
}

fn endpoints(segment: &LineSegment) -> ((f32, f32), (f32, f32)) {
    (
        (segment.p0[0] as f32, segment.p0[1] as f32),
        (segment.p1[0] as f32, segment.p1[1] as f32),
    )
}

/// Rasterizes `segment` into `mask` with the given thickness.
pub fn draw_segment(mask: &mut MaskU8, segment: &LineSegment, thickness: u32) {
    let (start, end) = endpoints(segment);
    draw_thick_line_mut(mask, start, end, thickness, Luma([MASK_ON]));
}

/// Draws a segment onto an RGB image.
pub fn draw_segment_rgb(image: &mut RgbImage, segment: &LineSegment, color: Rgb<u8>, thickness: u32) {
    let (start, end) = endpoints(segment);
    draw_thick_line_mut(image, start, end, thickness, color);
}

/// Pulls `to` back along the line from `from` until its column lies in
/// `[lo, hi]`. Keeps the Bresenham walk short when an intercept lands far
/// outside the frame.
fn limit_columns(from: (f32, f32), to: (f32, f32), lo: f32, hi: f32) -> (f32, f32) {
    if to.0 == from.0 {
        return to;
    }
    let bound = if to.0 > hi {
        hi
    } else if to.0 < lo {
        lo
    } else {
        return to;
    };
    let t = ((bound - from.0) / (to.0 - from.0)).clamp(0.0, 1.0);
    (from.0 + t * (to.0 - from.0), from.1 + t * (to.1 - from.1))
}

/// Draws each selected boundary from its anchor to its intercept, moved down
/// by the region's top row so it lines up with the full frame.
pub fn draw_lanes(image: &mut RgbImage, lanes: &LaneCandidates, region: &AnalysisRegion) {
    let margin = LANE_THICKNESS as f32;
    let hi = image.width() as f32 + margin;
    for hit in [lanes.left, lanes.right].into_iter().flatten() {
        let segment = LineSegment::new(hit.anchor, [hit.x, hit.y]).shifted(region.top as i32);
        let (start, end) = endpoints(&segment);
        let end = limit_columns(start, end, -margin, hi);
        draw_thick_line_mut(image, start, end, LANE_THICKNESS, LANE_COLOR);
    }
}
