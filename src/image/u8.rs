/// Borrowed 8-bit grayscale view with an explicit row stride.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Window of `width × height` pixels starting at row `top`, column 0.
    ///
    /// Returns `None` when the window is empty or does not fit.
    pub fn crop_rows(&self, top: usize, width: usize, height: usize) -> Option<ImageU8<'a>> {
        if width == 0 || height == 0 || width > self.w || top + height > self.h {
            return None;
        }
        let start = top * self.stride;
        Some(ImageU8 {
            w: width,
            h: height,
            stride: self.stride,
            data: &self.data[start..],
        })
    }

    /// Copies the view into a tightly packed `image::GrayImage`.
    pub fn to_gray_image(&self) -> image::GrayImage {
        let mut data = Vec::with_capacity(self.w * self.h);
        for row in crate::image::ImageView::rows(self) {
            data.extend_from_slice(row);
        }
        image::GrayImage::from_raw(self.w as u32, self.h as u32, data)
            .unwrap_or_else(|| image::GrayImage::new(self.w as u32, self.h as u32))
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
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
