//! Runs the detector over a directory of frames in file name order.
//!
//! The vote seed returned by each processed frame is handed to the next one.
//! Frames that cannot be decoded, or whose analysis region is empty, are
//! logged and skipped without producing a record; I/O failures on the
//! outputs abort the run.
use crate::detector::LineDetector;
use crate::image::io::{load_frame, save_rgb};
use crate::output::{FrameRecord, InterceptWriter};
use crate::pipeline::{FrameError, FrameReport, LaneDetector};
use crate::render::draw_lanes;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A frame that produced no record.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedFrame {
    pub frame: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SequenceSummary {
    pub processed: usize,
    pub skipped: Vec<SkippedFrame>,
    pub reports: Vec<FrameReport>,
}

/// Regular files in `dir`, sorted by file name.
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
    let mut frames = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            frames.push(path);
        }
    }
    frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(frames)
}

fn frame_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Processes `frames` in order, writing one record per processed frame and,
/// when `overlay_dir` is set, a `processed_<name>` overlay next to it.
pub fn run_sequence<D, W>(
    detector: &LaneDetector<D>,
    frames: &[PathBuf],
    writer: &mut InterceptWriter<W>,
    overlay_dir: Option<&Path>,
) -> Result<SequenceSummary, String>
where
    D: LineDetector,
    W: Write,
{
    let mut summary = SequenceSummary::default();
    let mut seed = detector.initial_seed();

    for path in frames {
        let name = frame_name(path);
        let outcome = load_frame(path)
            .map_err(|message| FrameError::Decode {
                path: path.display().to_string(),
                message,
            })
            .and_then(|frame| {
                detector
                    .process(frame.gray(), seed)
                    .map(|outcome| (frame, outcome))
            });
        let (frame, mut outcome) = match outcome {
            Ok(done) => done,
            Err(err) => {
                warn!("skipping {name}: {err}");
                summary.skipped.push(SkippedFrame {
                    frame: name,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        seed = outcome.next_seed;

        let record = FrameRecord::new(name.clone(), outcome.lanes());
        writer
            .write_record(&record)
            .map_err(|e| format!("Failed to write record for {name}: {e}"))?;
        info!("{record} (vote {:?})", outcome.report.hough_vote);

        if let Some(dir) = overlay_dir {
            let mut overlay = frame.rgb;
            draw_lanes(&mut overlay, outcome.lanes(), &outcome.region);
            save_rgb(&overlay, &dir.join(format!("processed_{name}")))?;
        }

        outcome.report.frame = name;
        summary.reports.push(outcome.report);
        summary.processed += 1;
    }
    Ok(summary)
}
