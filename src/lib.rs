#![doc = include_str!("../README.md")]

// Geometric core
pub mod clustering;
pub mod geometry;
pub mod lanes;

// Frame processing
pub mod detector;
pub mod edges;
pub mod image;
pub mod pipeline;
pub mod render;

// Tooling
pub mod config;
pub mod output;
pub mod sequence;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{LineDetector, SeedPersistence, VoteSeed};
pub use crate::geometry::{intersect, GeometryError, LineSegment};
pub use crate::lanes::{locate_lanes, AnalysisRegion, LaneCandidates, LaneEstimate};
pub use crate::pipeline::{FrameError, FrameOutcome, LaneDetector, LaneParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let det = LaneDetector::new(LaneParams::default());
/// if let Ok(outcome) = det.process(img, VoteSeed::default()) {
///     println!("left={:?} right={:?}", outcome.lanes().left_x(), outcome.lanes().right_x());
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{LaneCandidates, LaneDetector, LaneParams, LineSegment, VoteSeed};
}
