//! JSON configuration of the `lane_intercepts` tool.
//!
//! ```json
//! {
//!   "input": "frames/",
//!   "detector": { "threshold": { "persistence": "cross_frame" } },
//!   "output": {
//!     "intercepts_csv": "out/intercepts.csv",
//!     "overlay_dir": "out/overlays",
//!     "report_json": "out/report.json"
//!   }
//! }
//! ```
//! Everything except `input` may be omitted.
use crate::pipeline::LaneParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LaneToolConfig {
    /// Directory holding the frames, processed in file name order.
    pub input: PathBuf,
    #[serde(default)]
    pub detector: LaneParams,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub intercepts_csv: PathBuf,
    /// Where `processed_<name>` overlays go; none are written when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_dir: Option<PathBuf>,
    /// Per-frame reports as one JSON document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_json: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            intercepts_csv: PathBuf::from("intercepts.csv"),
            overlay_dir: None,
            report_json: None,
        }
    }
}

impl LaneToolConfig {
    /// Configuration used when the tool is pointed at a bare directory:
    /// default parameters, CSV and overlays in the working directory.
    pub fn for_input_dir(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            detector: LaneParams::default(),
            output: OutputConfig {
                overlay_dir: Some(PathBuf::from(".")),
                ..OutputConfig::default()
            },
        }
    }
}

pub fn load_config(path: &Path) -> Result<LaneToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
