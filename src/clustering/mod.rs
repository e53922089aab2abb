//! Segment clustering by direction similarity and midpoint proximity.
//!
//! Two segments are *equal* when
//! - their directions are within 6° of each other, sign-agnostic
//!   (`|cos θ| >= cos(π/30)`), and
//! - their midpoints are no further apart than 20% of the longer segment.
//!
//! The partition is the transitive closure of that predicate: a chain of
//! pairwise-equal segments lands in one cluster even when the chain's ends do
//! not satisfy the predicate themselves. It is built with union-find over all
//! pairs, which is O(n²) and fine for the tens of segments a frame produces.
//! The result does not depend on input order beyond the label numbering.
//!
//! Zero-length segments are equal to nothing and end up as singletons; they
//! produce a degenerate representative that the intercept stage skips.

pub mod aggregate;
mod union_find;

pub use aggregate::{aggregate_clusters, RepresentativeSegment};
pub use union_find::UnionFind;

use crate::geometry::angle::abs_cosine;
use crate::geometry::LineSegment;
use serde::Serialize;

/// Maximum direction difference for two segments to be equal (6°).
pub const DIRECTION_TOLERANCE_RAD: f64 = std::f64::consts::PI / 30.0;
/// Maximum midpoint distance as a fraction of the longer segment.
pub const PROXIMITY_RATIO: f64 = 0.2;

/// Pairwise predicate deciding whether two segments belong to one marking.
pub fn is_equal(a: &LineSegment, b: &LineSegment) -> bool {
    let (Ok(_), Ok(_)) = (a.direction(), b.direction()) else {
        return false;
    };

    if abs_cosine(&a.delta(), &b.delta()) < DIRECTION_TOLERANCE_RAD.cos() {
        return false;
    }

    let dist = (a.midpoint() - b.midpoint()).norm();
    dist <= a.length().max(b.length()) * PROXIMITY_RATIO
}

/// Partition of a frame's segments into disjoint, non-empty clusters.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clusters {
    /// Cluster label per input segment.
    pub labels: Vec<usize>,
    /// Member indices per cluster, ascending.
    pub members: Vec<Vec<usize>>,
}

impl Clusters {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.members.iter().map(Vec::as_slice)
    }
}

/// Groups segments with union-find over [`is_equal`].
pub fn cluster_segments(segments: &[LineSegment]) -> Clusters {
    let n = segments.len();
    let mut uf = UnionFind::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if is_equal(&segments[i], &segments[j]) {
                uf.union(i, j);
            }
        }
    }

    let (labels, count) = uf.labels();
    let mut members = vec![Vec::new(); count];
    for (idx, &label) in labels.iter().enumerate() {
        members[label].push(idx);
    }
    Clusters { labels, members }
}
