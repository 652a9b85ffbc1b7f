//! Video metadata extraction via ffprobe

use anyhow::Result;
use std::process::Command;
use tracing::{error, info};

/// Probe the duration of a video file in seconds
///
/// Runs `ffprobe` on the given path and parses its JSON output. Returns
/// `None` when the container does not report a duration.
pub async fn extract_duration(file_path: &str) -> Result<Option<f64>> {
    info!("Probing video duration for file: {}", file_path);

    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("quiet")
        .arg("-print_format")
        .arg("json")
        .arg("-show_format")
        .arg(file_path)
        .output()?;

    if !output.status.success() {
        error!("ffprobe failed with status: {:?}", output.status);
        return Err(anyhow::anyhow!("ffprobe failed"));
    }

    let json_str = String::from_utf8(output.stdout)?;
    let ffprobe_data: serde_json::Value = serde_json::from_str(&json_str)?;

    Ok(parse_duration(&ffprobe_data))
}

/// Extract the duration from ffprobe's `-show_format` JSON output
fn parse_duration(ffprobe_data: &serde_json::Value) -> Option<f64> {
    ffprobe_data
        .get("format")
        .and_then(|format| format.get("duration"))
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<f64>().ok())
}
