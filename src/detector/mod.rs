//! Line detection on binary edge maps.
//!
//! Modules
//! - [`hough`] – standard Hough lines ([`PolarLine`]) from `imageproc`, plus
//!   the lane band filter and row spanning used by the confirmation mask.
//! - [`segments`] – [`HoughSegmentDetector`], a probabilistic-style detector
//!   turning standard Hough lines into finite segments.
//! - [`threshold`] – the adaptive vote controller driving the standard pass.
//!
//! The geometric core only sees the [`LineDetector`] contract: an edge map and
//! [`DetectParams`] in, raw [`LineSegment`]s out. Any closure with the same
//! shape implements it, which keeps the pipeline testable with canned
//! detections.

pub mod hough;
pub mod segments;
pub mod threshold;

pub use hough::{in_lane_band, span_rows, standard_lines, PolarLine};
pub use segments::HoughSegmentDetector;
pub use threshold::{AdaptiveThreshold, SeedPersistence, ThresholdParams, ThresholdRun, VoteSeed};

use crate::geometry::LineSegment;
use crate::image::MaskU8;
use serde::{Deserialize, Serialize};

/// Knobs handed to a [`LineDetector`] on every call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectParams {
    /// A line needs more than this many votes.
    pub vote_threshold: u32,
    /// Shortest segment reported, in pixels.
    pub min_length: f64,
    /// Largest run of missing pixels bridged inside one segment.
    pub max_gap: u32,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            vote_threshold: 90,
            min_length: 250.0,
            max_gap: 120,
        }
    }
}

/// Converts an edge map into raw line segments.
pub trait LineDetector {
    fn detect(&self, edges: &MaskU8, params: &DetectParams) -> Vec<LineSegment>;
}

impl<F> LineDetector for F
where
    F: Fn(&MaskU8, &DetectParams) -> Vec<LineSegment>,
{
    fn detect(&self, edges: &MaskU8, params: &DetectParams) -> Vec<LineSegment> {
        self(edges, params)
    }
}
