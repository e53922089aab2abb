//! Parameters of the per-frame pipeline.
//!
//! Defaults: a 17×17 blur, the region of interest starting at 5/12 of the
//! frame *width* below the top, Canny 20/50 for the first edge map and 30/65
//! for the confirmed-line map, and a segment detector requiring 90 votes,
//! 250 px length and bridging gaps of 120 px.
//!
//! The clustering tolerances (6°, 20%) and the parallel-line epsilon are not
//! here on purpose; they live as constants next to the code using them.

use crate::detector::{DetectParams, ThresholdParams};
use crate::edges::FRAME_BLUR_SIGMA;
use crate::geometry::angle::DegreeBand;
use crate::lanes::AnalysisRegion;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CannyThresholds {
    pub low: f32,
    pub high: f32,
}

/// Top row of the analyzed region as `numerator / denominator` of the frame
/// width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTop {
    pub numerator: u32,
    pub denominator: u32,
}

impl RegionTop {
    pub fn row_for_width(&self, width: u32) -> u32 {
        let den = self.denominator.max(1) as u64;
        (width as u64 * self.numerator as u64 / den) as u32
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    /// Gaussian σ applied to the full frame; 0 disables smoothing.
    pub blur_sigma: f32,
    pub region_top: RegionTop,
    pub canny: CannyThresholds,
    /// Canny thresholds for the map of confirmed lines.
    pub confirm_canny: CannyThresholds,
    /// Adaptive vote control for the standard Hough pass.
    pub threshold: ThresholdParams,
    /// Stroke width of standard Hough lines in the confirmation mask.
    pub band_line_thickness: u32,
    /// Stroke width of detected segments in the confirmation mask.
    pub segment_line_thickness: u32,
    /// Parameters of both segment detector calls.
    pub segments: DetectParams,
    /// Segment orientations (degrees, rows pointing up) kept for the mask.
    pub segment_angle_bands: Vec<DegreeBand>,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self {
            blur_sigma: FRAME_BLUR_SIGMA,
            region_top: RegionTop {
                numerator: 5,
                denominator: 12,
            },
            canny: CannyThresholds {
                low: 20.0,
                high: 50.0,
            },
            confirm_canny: CannyThresholds {
                low: 30.0,
                high: 65.0,
            },
            threshold: ThresholdParams::default(),
            band_line_thickness: 8,
            segment_line_thickness: 6,
            segments: DetectParams::default(),
            segment_angle_bands: vec![
                DegreeBand::new(10.0, 90.0),
                DegreeBand::new(-90.0, -10.0),
                DegreeBand::new(90.0, 150.0),
            ],
        }
    }
}

impl LaneParams {
    /// Analyzed region of a `width × height` frame: from the configured top
    /// row to the bottom, one column narrower than the frame. `None` when
    /// that region is empty.
    pub fn region_for(&self, width: u32, height: u32) -> Option<AnalysisRegion> {
        let top = self.region_top.row_for_width(width);
        if width < 2 || top >= height {
            return None;
        }
        Some(AnalysisRegion::new(width - 1, height - top, top))
    }
}
