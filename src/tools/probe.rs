use anyhow::{Context, Result, bail};
use log::warn;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Deserialize)]
struct FfprobeOutput {
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct StreamInfo {
    nb_read_packets: Option<String>,
}

/// Total frame count of the first video stream, via ffprobe packet counting.
///
/// Never fails: any probe error yields 0, which the scheduler treats as
/// "unusable" and skips. Normalized cache entries carry a single video
/// stream with one frame per packet, so the packet count is the frame count.
#[must_use]
pub fn frame_count(path: &Path) -> i64 {
    match probe_frame_count(path) {
        Ok(count) => count,
        Err(e) => {
            warn!("cannot probe {}: {e:#}", path.display());
            0
        }
    }
}

fn probe_frame_count(path: &Path) -> Result<i64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-count_packets",
            "-show_entries",
            "stream=nb_read_packets",
            "-print_format",
            "json",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("cannot run ffprobe on {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe failed: {}", stderr.trim());
    }

    parse_packet_count(&String::from_utf8_lossy(&output.stdout))
}

fn parse_packet_count(json: &str) -> Result<i64> {
    let probe: FfprobeOutput =
        serde_json::from_str(json).context("cannot parse ffprobe output")?;

    let count = probe
        .streams
        .and_then(|streams| streams.into_iter().next())
        .and_then(|s| s.nb_read_packets)
        .ok_or_else(|| anyhow::anyhow!("no video stream packet count in ffprobe output"))?;

    count
        .parse::<i64>()
        .with_context(|| format!("invalid packet count: {count}"))
}
