use super::Clusters;
use crate::geometry::{to_point, LineSegment};
use nalgebra::Point2;
use serde::Serialize;

/// Averaged stand-in for one cluster of raw segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeSegment {
    /// Mean of the members' upper (smaller row) endpoints.
    pub upper: [i32; 2],
    /// Mean of the members' lower (larger row) endpoints.
    pub lower: [i32; 2],
    pub members: usize,
}

impl RepresentativeSegment {
    pub fn upper_point(&self) -> Point2<f64> {
        to_point(self.upper)
    }

    pub fn lower_point(&self) -> Point2<f64> {
        to_point(self.lower)
    }
}

/// Collapses every cluster into its endpoint-wise mean segment.
///
/// Means are rounded half-to-even to whole pixels. Output order follows the
/// cluster labels.
pub fn aggregate_clusters(
    segments: &[LineSegment],
    clusters: &Clusters,
) -> Vec<RepresentativeSegment> {
    clusters
        .iter()
        .map(|members| {
            let mut upper_sum = [0i64; 2];
            let mut lower_sum = [0i64; 2];
            for &idx in members {
                let (upper, lower) = segments[idx].oriented();
                upper_sum[0] += upper[0] as i64;
                upper_sum[1] += upper[1] as i64;
                lower_sum[0] += lower[0] as i64;
                lower_sum[1] += lower[1] as i64;
            }
            let n = members.len();
            RepresentativeSegment {
                upper: mean_point(upper_sum, n),
                lower: mean_point(lower_sum, n),
                members: n,
            }
        })
        .collect()
}

fn mean_point(sum: [i64; 2], n: usize) -> [i32; 2] {
    let inv = 1.0 / n as f64;
    [
        (sum[0] as f64 * inv).round_ties_even() as i32,
        (sum[1] as f64 * inv).round_ties_even() as i32,
    ]
}
