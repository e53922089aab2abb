//! Frame driver turning one grayscale frame into left/right lane intercepts.
//!
//! Stages, in order:
//! 1. Gaussian blur of the full frame.
//! 2. Cut the analyzed region (from `5·W/12` down, `W-1` columns wide).
//! 3. Canny edge map of the region.
//! 4. Standard Hough with adaptive vote control; lines in the lane bands are
//!    drawn thick into a mask.
//! 5. Segment detection on the same edges; segments in the accepted angle
//!    bands are drawn into a second mask.
//! 6. The two masks are intersected, edges are taken again and segments are
//!    detected on them.
//! 7. Those segments go through clustering, aggregation and intercept
//!    selection.
//!
//! ```no_run
//! use lane_detector::image::io::load_frame;
//! use lane_detector::{LaneDetector, LaneParams, VoteSeed};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = load_frame(std::path::Path::new("frame.png"))?;
//! let detector = LaneDetector::new(LaneParams::default());
//! let outcome = detector.process(frame.gray(), VoteSeed::default())?;
//! println!("{:?} {:?}", outcome.lanes().left_x(), outcome.lanes().right_x());
//! # Ok(())
//! # }
//! ```
mod params;
mod report;

pub use params::{CannyThresholds, LaneParams, RegionTop};
pub use report::{FrameReport, StageTiming, TimingBreakdown};

use crate::detector::{
    in_lane_band, span_rows, standard_lines, AdaptiveThreshold, HoughSegmentDetector,
    LineDetector, VoteSeed,
};
use crate::edges::{canny_mask, smooth};
use crate::geometry::angle::in_any_band;
use crate::geometry::LineSegment;
use crate::image::{ImageU8, MaskU8};
use crate::lanes::{locate_lanes, AnalysisRegion, LaneCandidates, LaneEstimate};
use crate::render::draw_segment;
use log::debug;
use std::fmt;
use std::time::Instant;

/// Reasons a single frame yields no result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// The file could not be read or decoded as an image.
    Decode { path: String, message: String },
    /// The analyzed region of a `width × height` frame has no pixels.
    EmptyRegion { width: usize, height: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Decode { path, message } => {
                write!(f, "failed to decode frame {path}: {message}")
            }
            FrameError::EmptyRegion { width, height } => {
                write!(f, "frame {width}x{height} has an empty analysis region")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Result of processing one frame.
#[derive(Clone, Debug)]
pub struct FrameOutcome {
    pub region: AnalysisRegion,
    pub estimate: LaneEstimate,
    /// Seed to pass with the next frame of the sequence.
    pub next_seed: VoteSeed,
    pub report: FrameReport,
}

impl FrameOutcome {
    pub fn lanes(&self) -> &LaneCandidates {
        &self.estimate.lanes
    }
}

/// Per-frame lane detector.
///
/// Holds no state between frames; the vote seed is passed in and returned
/// explicitly so the caller owns the sequence.
pub struct LaneDetector<D: LineDetector = HoughSegmentDetector> {
    params: LaneParams,
    threshold: AdaptiveThreshold,
    detector: D,
}

impl LaneDetector<HoughSegmentDetector> {
    pub fn new(params: LaneParams) -> Self {
        Self::with_detector(params, HoughSegmentDetector)
    }
}

impl<D: LineDetector> LaneDetector<D> {
    /// Detector using `detector` for both segment passes.
    pub fn with_detector(params: LaneParams, detector: D) -> Self {
        let threshold = AdaptiveThreshold::new(params.threshold.clone());
        Self {
            params,
            threshold,
            detector,
        }
    }

    pub fn params(&self) -> &LaneParams {
        &self.params
    }

    /// Seed to start a new sequence with.
    pub fn initial_seed(&self) -> VoteSeed {
        self.params.threshold.initial
    }

    /// Runs all stages on `gray`, starting vote control from `seed`.
    pub fn process(&self, gray: ImageU8, seed: VoteSeed) -> Result<FrameOutcome, FrameError> {
        let (width, height) = (gray.w, gray.h);
        let region = self
            .params
            .region_for(width as u32, height as u32)
            .ok_or(FrameError::EmptyRegion { width, height })?;
        debug!(
            "LaneDetector::process start w={} h={} roi_top={} roi={}x{}",
            width, height, region.top, region.width, region.height
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let blurred = smooth(&gray, self.params.blur_sigma);
        let blurred_view = ImageU8 {
            w: width,
            h: height,
            stride: width,
            data: blurred.as_raw(),
        };
        let roi = blurred_view
            .crop_rows(
                region.top as usize,
                region.width as usize,
                region.height as usize,
            )
            .ok_or(FrameError::EmptyRegion { width, height })?;
        let canny = self.params.canny;
        let edges = canny_mask(&roi.to_gray_image(), canny.low, canny.high);
        timings.push("edges", ms_since(stage));
        debug!("edges: {} edge pixels", edges.count_set());

        let stage = Instant::now();
        let edge_image = edges.to_gray_image();
        let hough = self.threshold.run(seed, |vote| standard_lines(&edge_image, vote));
        let mut band_mask = MaskU8::new(edges.w, edges.h);
        let mut band_lines = 0usize;
        for line in hough.lines.iter().filter(|l| in_lane_band(l)) {
            if let Some(segment) = span_rows(line, region.height) {
                draw_segment(&mut band_mask, &segment, self.params.band_line_thickness);
                band_lines += 1;
            }
        }
        timings.push("hough", ms_since(stage));
        debug!(
            "hough: vote={:?} attempts={} lines={} in_band={} next_seed={:?}",
            hough.vote_used,
            hough.attempts,
            hough.lines.len(),
            band_lines,
            hough.next_seed
        );

        let stage = Instant::now();
        let first_pass = self.detector.detect(&edges, &self.params.segments);
        let mut segment_mask = MaskU8::new(edges.w, edges.h);
        for segment in first_pass
            .iter()
            .filter(|s| in_any_band(&self.params.segment_angle_bands, s.screen_angle_deg()))
        {
            draw_segment(
                &mut segment_mask,
                segment,
                self.params.segment_line_thickness,
            );
        }
        segment_mask.and_assign(&band_mask);
        let confirm = self.params.confirm_canny;
        let confirmed_edges =
            canny_mask(&segment_mask.to_gray_image(), confirm.low, confirm.high);
        let raw_segments: Vec<LineSegment> =
            self.detector.detect(&confirmed_edges, &self.params.segments);
        timings.push("segments", ms_since(stage));
        debug!(
            "segments: first_pass={} confirmed_edges={} raw={}",
            first_pass.len(),
            confirmed_edges.count_set(),
            raw_segments.len()
        );

        let stage = Instant::now();
        let estimate = locate_lanes(&raw_segments, &region);
        timings.push("lanes", ms_since(stage));
        timings.total_ms = ms_since(total_start);
        debug!(
            "lanes: clusters={} left={:?} right={:?} total_ms={:.2}",
            estimate.clusters.len(),
            estimate.lanes.left_x(),
            estimate.lanes.right_x(),
            timings.total_ms
        );

        let report = FrameReport {
            frame: String::new(),
            region,
            hough_vote: hough.vote_used,
            hough_attempts: hough.attempts,
            hough_lines: hough.lines.len(),
            band_lines,
            first_pass_segments: first_pass.len(),
            raw_segments: raw_segments.len(),
            clusters: estimate.clusters.len(),
            representatives: estimate.representatives.clone(),
            lanes: estimate.lanes,
            timings,
        };
        Ok(FrameOutcome {
            region,
            estimate,
            next_seed: hough.next_seed,
            report,
        })
    }
}

fn ms_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
