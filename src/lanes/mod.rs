//! Lane intercept selection.
//!
//! Every representative segment is extended to the reference row (the bottom
//! edge of the analyzed region). Crossings right of the region's horizontal
//! midpoint compete for the right boundary, crossings left of it for the left
//! boundary; a crossing exactly on the midpoint is dropped. On each side the
//! crossing closest to the midpoint wins, so within a frame the right
//! candidate's x only decreases and the left candidate's x only increases.
//!
//! [`locate_lanes`] chains clustering, aggregation and selection for one
//! frame's raw segments.

mod selector;

pub use selector::{Intercept, LaneCandidates, LaneSide};

use crate::clustering::{aggregate_clusters, cluster_segments, Clusters, RepresentativeSegment};
use crate::geometry::{intersect, LineSegment};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Analyzed sub-image of a frame: its size and the row it starts at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRegion {
    pub width: u32,
    pub height: u32,
    /// Row offset of the region inside the full frame.
    pub top: u32,
}

impl AnalysisRegion {
    pub const fn new(width: u32, height: u32, top: u32) -> Self {
        Self { width, height, top }
    }

    /// Row all intercepts are computed against.
    pub fn reference_row(&self) -> i32 {
        self.height as i32
    }

    /// Integer horizontal midpoint used for the left/right split.
    pub fn midpoint_x(&self) -> i32 {
        (self.width / 2) as i32
    }

    /// Where the supporting line of `rep` crosses the reference row, if it does.
    /// The anchor is the upper endpoint until a side re-anchors it.
    pub fn intercept(&self, rep: &RepresentativeSegment) -> Option<Intercept> {
        let row = self.reference_row() as f64;
        let hit = intersect(
            rep.lower_point(),
            rep.upper_point(),
            Point2::new(0.0, row),
            Point2::new(self.width as f64, row),
        )?;
        if !hit.x.is_finite() {
            return None;
        }
        Some(Intercept {
            x: hit.x.round_ties_even() as i32,
            y: hit.y.round_ties_even() as i32,
            anchor: rep.upper,
        })
    }
}

/// Everything the geometric core derived from one frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneEstimate {
    pub clusters: Clusters,
    pub representatives: Vec<RepresentativeSegment>,
    pub lanes: LaneCandidates,
}

/// Clusters `segments`, averages each cluster and picks the innermost
/// intercept on each side of `region`.
pub fn locate_lanes(segments: &[LineSegment], region: &AnalysisRegion) -> LaneEstimate {
    let clusters = cluster_segments(segments);
    let representatives = aggregate_clusters(segments, &clusters);
    let mut lanes = LaneCandidates::default();
    for rep in &representatives {
        lanes.offer(rep, region);
    }
    LaneEstimate {
        clusters,
        representatives,
        lanes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: i32, y1: i32, x2: i32, y2: i32) -> LineSegment {
        LineSegment::from_coords(x1, y1, x2, y2)
    }

    const REGION: AnalysisRegion = AnalysisRegion::new(200, 300, 0);

    #[test]
    fn no_segments_leaves_both_sides_empty() {
        let estimate = locate_lanes(&[], &REGION);
        assert!(estimate.clusters.is_empty());
        assert_eq!(estimate.lanes.left, None);
        assert_eq!(estimate.lanes.right, None);
    }

    #[test]
    fn collinear_pair_left_of_center_sets_left_only() {
        let segments = [seg(10, 300, 50, 280), seg(48, 281, 90, 260)];
        let estimate = locate_lanes(&segments, &REGION);
        // Too far apart to merge, but both extend to the same crossing.
        assert_eq!(estimate.representatives.len(), 2);
        let left = estimate.lanes.left.expect("left candidate");
        assert_eq!(left.x, 10);
        assert_eq!(left.y, 300);
        assert!(left.x < REGION.midpoint_x());
        assert_eq!(estimate.lanes.right, None);
    }

    #[test]
    fn merged_pair_uses_the_averaged_line() {
        let segments = [seg(10, 300, 50, 280), seg(12, 299, 52, 279)];
        let estimate = locate_lanes(&segments, &REGION);
        assert_eq!(estimate.clusters.len(), 1);
        assert_eq!(estimate.lanes.left.map(|i| i.x), Some(11));
        assert_eq!(estimate.lanes.right, None);
    }

    #[test]
    fn mirrored_segments_populate_both_sides() {
        let segments = [seg(10, 300, 50, 280), seg(190, 300, 150, 280)];
        let estimate = locate_lanes(&segments, &REGION);
        let left = estimate.lanes.left.expect("left").x;
        let right = estimate.lanes.right.expect("right").x;
        assert_eq!(left, 10);
        assert_eq!(right, 190);
        assert_eq!(REGION.midpoint_x() - left, right - REGION.midpoint_x());
    }

    #[test]
    fn crossing_on_the_midpoint_is_dropped() {
        let estimate = locate_lanes(&[seg(100, 300, 100, 200)], &REGION);
        assert_eq!(estimate.representatives.len(), 1);
        assert_eq!(estimate.lanes.left, None);
        assert_eq!(estimate.lanes.right, None);
    }

    #[test]
    fn horizontal_segment_never_crosses_the_reference_row() {
        assert_eq!(REGION.intercept(&rep([10, 250], [90, 250])), None);
        let estimate = locate_lanes(&[seg(10, 250, 90, 250)], &REGION);
        assert_eq!(estimate.lanes, LaneCandidates::default());
    }

    #[test]
    fn intercept_anchor_is_the_upper_endpoint() {
        let hit = REGION.intercept(&rep([50, 280], [10, 300])).expect("crosses");
        assert_eq!(hit.anchor, [50, 280]);
        assert_eq!((hit.x, hit.y), (10, 300));
    }

    #[test]
    fn left_lanes_anchor_high_and_right_lanes_anchor_low() {
        let segments = [seg(10, 300, 50, 280), seg(190, 300, 150, 280)];
        let lanes = locate_lanes(&segments, &REGION).lanes;
        assert_eq!(lanes.left.expect("left").anchor, [50, 280]);
        assert_eq!(lanes.right.expect("right").anchor, [190, 300]);
    }

    #[test]
    fn endpoint_order_of_a_flat_member_does_not_change_the_lanes() {
        let sloped = seg(0, 96, 100, 104);
        let forward = locate_lanes(&[seg(0, 100, 100, 100), sloped], &REGION);
        let reversed = locate_lanes(&[seg(100, 100, 0, 100), sloped], &REGION);
        assert_eq!(forward.clusters.len(), 1);
        assert_eq!(forward.representatives, reversed.representatives);
        assert_eq!(forward.representatives[0].upper, [0, 98]);
        assert_eq!(forward.representatives[0].lower, [100, 102]);
        assert_eq!(forward.lanes, reversed.lanes);
        assert_eq!(forward.lanes.right_x(), Some(5050));
        assert_eq!(forward.lanes.left, None);
    }

    fn rep(upper: [i32; 2], lower: [i32; 2]) -> RepresentativeSegment {
        RepresentativeSegment {
            upper,
            lower,
            members: 1,
        }
    }
}
