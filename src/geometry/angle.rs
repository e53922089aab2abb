//! Angle utilities shared by the clustering predicate and the detector filters.
use nalgebra::Vector2;

/// Absolute cosine of the angle between two vectors, treating antipodal
/// directions as equivalent. Returns a value in [0, 1].
///
/// Vectors are expected to be non-zero; callers check degeneracy first.
#[inline]
pub fn abs_cosine(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    (a.dot(b) / denom).abs().min(1.0)
}

/// Open interval of angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DegreeBand {
    pub min: f64,
    pub max: f64,
}

impl DegreeBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, deg: f64) -> bool {
        deg > self.min && deg < self.max
    }
}

/// True if `deg` lies strictly inside any of `bands`.
pub fn in_any_band(bands: &[DegreeBand], deg: f64) -> bool {
    bands.iter().any(|b| b.contains(deg))
}
