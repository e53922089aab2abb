//! Owned single-channel 8-bit mask in row-major layout (stride == width).
//!
//! Used for edge maps and rasterized line masks. Non-zero pixels are "set";
//! writers store 255 so the buffer stays a valid grayscale image.
use super::{ImageView, ImageViewMut};
use image::Luma;

pub const MASK_ON: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskU8 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of bytes between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl MaskU8 {
    /// Construct an all-clear mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    /// Wrap a tightly packed `image::GrayImage`.
    pub fn from_gray_image(img: image::GrayImage) -> Self {
        let w = img.width() as usize;
        let h = img.height() as usize;
        Self {
            w,
            h,
            stride: w,
            data: img.into_raw(),
        }
    }

    pub fn to_gray_image(&self) -> image::GrayImage {
        image::GrayImage::from_raw(self.w as u32, self.h as u32, self.data.clone())
            .unwrap_or_else(|| image::GrayImage::new(self.w as u32, self.h as u32))
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        let i = self.idx(x, y);
        self.data[i] = MASK_ON;
    }

    /// Pixel-wise AND with a mask of the same size.
    pub fn and_assign(&mut self, other: &MaskU8) {
        debug_assert_eq!((self.w, self.h), (other.w, other.h));
        for y in 0..self.h.min(other.h) {
            let src = other.row(y);
            for (dst, &s) in self.row_mut(y).iter_mut().zip(src) {
                if s == 0 {
                    *dst = 0;
                }
            }
        }
    }

    pub fn count_set(&self) -> usize {
        self.rows()
            .map(|row| row.iter().filter(|&&v| v != 0).count())
            .sum()
    }
}

impl ImageView for MaskU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for MaskU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

/// Lets the `imageproc::drawing` rasterizers write straight into the mask.
impl imageproc::drawing::Canvas for MaskU8 {
    type Pixel = Luma<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.w as u32, self.h as u32)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Luma<u8> {
        Luma([self.data[self.idx(x as usize, y as usize)]])
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Luma<u8>) {
        let i = self.idx(x as usize, y as usize);
        self.data[i] = color[0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_keeps_common_pixels() {
        let mut a = MaskU8::new(4, 2);
        let mut b = MaskU8::new(4, 2);
        a.set(0, 0);
        a.set(1, 1);
        a.set(3, 1);
        b.set(1, 1);
        b.set(2, 0);
        b.set(3, 1);
        a.and_assign(&b);
        assert_eq!(a.count_set(), 2);
        assert!(a.is_set(1, 1) && a.is_set(3, 1));
        assert!(!a.is_set(0, 0));
    }

    #[test]
    fn imageproc_draws_into_the_mask() {
        use imageproc::drawing::{draw_line_segment_mut, Canvas};
        let mut m = MaskU8::new(6, 3);
        draw_line_segment_mut(&mut m, (-4.0, 1.0), (20.0, 1.0), Luma([MASK_ON]));
        assert_eq!(m.count_set(), 6);
        assert!((0..6).all(|x| m.is_set(x, 1)));
        assert_eq!(Canvas::get_pixel(&m, 2, 1), Luma([MASK_ON]));
        assert_eq!(Canvas::get_pixel(&m, 2, 0), Luma([0]));
    }

    #[test]
    fn gray_image_roundtrip_keeps_layout() {
        let mut m = MaskU8::new(5, 2);
        m.set(4, 1);
        let back = MaskU8::from_gray_image(m.to_gray_image());
        assert_eq!(back, m);
    }
}
