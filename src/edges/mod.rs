//! Edge-map extraction: Gaussian smoothing and Canny, via `imageproc`.
//!
//! - [`smooth`] blurs the whole frame before the region of interest is cut,
//!   matching a 17×17 kernel (σ ≈ 2.9).
//! - [`canny_mask`] turns a gray view into a binary [`MaskU8`] edge map.
//!
//! `imageproc` requires `low <= high`; thresholds are swapped when given the
//! other way round.
use crate::image::{ImageU8, MaskU8};
use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

/// σ of a 17-tap kernel derived from its size: `0.3·((17-1)/2 - 1) + 0.8`.
pub const FRAME_BLUR_SIGMA: f32 = 2.9;

/// Gaussian-blurred copy of `gray`. A non-positive σ returns a plain copy.
pub fn smooth(gray: &ImageU8, sigma: f32) -> GrayImage {
    let img = gray.to_gray_image();
    if sigma > 0.0 {
        gaussian_blur_f32(&img, sigma)
    } else {
        img
    }
}

/// Canny edge map of `gray` with hysteresis thresholds in either order.
pub fn canny_mask(gray: &GrayImage, low: f32, high: f32) -> MaskU8 {
    let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
    MaskU8::from_gray_image(canny(gray, lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripe_image(w: u32, h: u32, x0: u32, x1: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, _| {
            if (x0..x1).contains(&x) {
                image::Luma([230])
            } else {
                image::Luma([30])
            }
        })
    }

    #[test]
    fn canny_marks_stripe_borders_only() {
        let img = stripe_image(40, 30, 15, 25);
        let edges = canny_mask(&img, 50.0, 20.0);
        assert!(edges.count_set() > 0);
        for y in 3..27 {
            assert!(!edges.is_set(5, y), "flat area marked at y={y}");
            assert!(!edges.is_set(20, y), "stripe interior marked at y={y}");
        }
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = GrayImage::from_pixel(32, 32, image::Luma([128]));
        assert_eq!(canny_mask(&img, 20.0, 50.0).count_set(), 0);
    }

    #[test]
    fn zero_sigma_is_a_copy() {
        let data: Vec<u8> = (0..64).map(|v| v as u8 * 3).collect();
        let view = ImageU8 {
            w: 8,
            h: 8,
            stride: 8,
            data: &data,
        };
        assert_eq!(smooth(&view, 0.0).into_raw(), data);
    }
}
