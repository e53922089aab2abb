use crate::clustering::RepresentativeSegment;
use crate::lanes::{AnalysisRegion, LaneCandidates};
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of the frame pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Per-frame diagnostics, serializable for tooling.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub frame: String,
    pub region: AnalysisRegion,
    /// Vote of the last standard Hough attempt.
    pub hough_vote: Option<u32>,
    pub hough_attempts: usize,
    pub hough_lines: usize,
    pub band_lines: usize,
    pub first_pass_segments: usize,
    pub raw_segments: usize,
    pub clusters: usize,
    pub representatives: Vec<RepresentativeSegment>,
    pub lanes: LaneCandidates,
    pub timings: TimingBreakdown,
}
