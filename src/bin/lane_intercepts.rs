use lane_detector::config::{self, LaneToolConfig};
use lane_detector::image::io::write_json_file;
use lane_detector::output::InterceptWriter;
use lane_detector::sequence::{list_frames, run_sequence};
use lane_detector::LaneDetector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let arg = env::args().nth(1).ok_or_else(usage)?;
    let arg = Path::new(&arg);
    let config = if arg.is_dir() {
        LaneToolConfig::for_input_dir(arg)
    } else {
        config::load_config(arg)?
    };

    let frames = list_frames(&config.input)?;
    let detector = LaneDetector::new(config.detector.clone());
    let mut writer = InterceptWriter::create(&config.output.intercepts_csv)?;
    let summary = run_sequence(
        &detector,
        &frames,
        &mut writer,
        config.output.overlay_dir.as_deref(),
    )?;
    writer.finish().map_err(|e| {
        format!(
            "Failed to write {}: {e}",
            config.output.intercepts_csv.display()
        )
    })?;

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &summary)?;
        println!("Saved frame reports to {}", path.display());
    }
    println!(
        "Processed {} frames ({} skipped), intercepts in {}",
        summary.processed,
        summary.skipped.len(),
        config.output.intercepts_csv.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: lane_intercepts <input-dir | config.json>".to_string()
}
