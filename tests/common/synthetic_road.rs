/// Road-like frame: dark background with two bright straight stripes rising
/// from the bottom row towards the image center.
pub struct RoadScene {
    pub width: usize,
    pub height: usize,
    /// Stripe centers on the bottom row (left, right).
    pub bottom_x: (f64, f64),
    /// Stripe inclination from the horizontal, degrees.
    pub angle_deg: f64,
    /// Horizontal stripe width in pixels.
    pub stripe_width: f64,
    pub background: u8,
    pub paint: u8,
}

impl Default for RoadScene {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            bottom_x: (150.0, 1049.0),
            angle_deg: 40.0,
            stripe_width: 12.0,
            background: 40,
            paint: 220,
        }
    }
}

impl RoadScene {
    /// Horizontal shift of a stripe center per row travelled upwards.
    fn run_per_row(&self) -> f64 {
        1.0 / self.angle_deg.to_radians().tan()
    }

    /// Centers of the left and right stripe on row `y`.
    pub fn centers_at(&self, y: usize) -> (f64, f64) {
        let up = (self.height - 1 - y) as f64;
        let run = up * self.run_per_row();
        (self.bottom_x.0 + run, self.bottom_x.1 - run)
    }

    /// Row-major 8-bit gray buffer.
    pub fn gray(&self) -> Vec<u8> {
        let half = self.stripe_width / 2.0;
        let mut img = vec![self.background; self.width * self.height];
        for y in 0..self.height {
            let (left, right) = self.centers_at(y);
            for x in 0..self.width {
                let xf = x as f64;
                if (xf - left).abs() <= half || (xf - right).abs() <= half {
                    img[y * self.width + x] = self.paint;
                }
            }
        }
        img
    }

    pub fn rgb(&self) -> image::RgbImage {
        let gray = self.gray();
        image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = gray[y as usize * self.width + x as usize];
            image::Rgb([v, v, v])
        })
    }
}
