//! Stream inspection using `ffprobe -show_streams`.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

use super::types::{ProbeError, ProbeResult};
use super::StreamInspector;
use crate::models::{MediaKind, StreamInfo};

/// Inspector backed by the `ffprobe` executable.
#[derive(Debug, Clone)]
pub struct FfprobeInspector {
    /// Path to ffprobe executable (None = find in PATH).
    ffprobe_path: Option<PathBuf>,
}

impl FfprobeInspector {
    pub fn new() -> Self {
        Self { ffprobe_path: None }
    }

    /// Set a custom path to the ffprobe executable.
    pub fn with_ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffprobe_path = Some(path.into());
        self
    }

    fn ffprobe_cmd(&self) -> &str {
        self.ffprobe_path
            .as_ref()
            .and_then(|p| p.to_str())
            .unwrap_or("ffprobe")
    }
}

impl Default for FfprobeInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamInspector for FfprobeInspector {
    fn inspect(&self, path: &Path) -> ProbeResult<StreamInfo> {
        if !path.exists() {
            return Err(ProbeError::FileNotFound(path.to_path_buf()));
        }

        let tool = self.ffprobe_cmd();
        tracing::debug!("Probing file: {}", path.display());

        let output = Command::new(tool)
            .args(["-v", "error", "-show_streams", "-of", "json"])
            .arg(path)
            .output()
            .map_err(|source| ProbeError::Spawn {
                tool: tool.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::CommandFailed {
                tool: tool.to_string(),
                exit_code: output.status.code().unwrap_or(-1),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let json: Value = serde_json::from_slice(&output.stdout)?;
        parse_ffprobe_json(&json)
    }
}

/// Extract [`StreamInfo`] from `ffprobe -show_streams -of json` output.
///
/// Only the first stream is considered. ffprobe reports `start_time` as a
/// decimal string; width and height are integers on video streams.
pub fn parse_ffprobe_json(json: &Value) -> ProbeResult<StreamInfo> {
    let stream = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .ok_or(ProbeError::NoStreams)?;

    let codec_type = stream
        .get("codec_type")
        .and_then(|c| c.as_str())
        .ok_or(ProbeError::MissingField("codec_type"))?;

    let start_offset_secs = stream
        .get("start_time")
        .and_then(parse_number)
        .ok_or(ProbeError::MissingField("start_time"))?;

    let kind = MediaKind::from_codec_type(codec_type)
        .ok_or_else(|| ProbeError::UnsupportedStream(codec_type.to_string()))?;

    match kind {
        MediaKind::Audio => Ok(StreamInfo::audio(start_offset_secs)),
        MediaKind::Video => {
            let width = stream
                .get("width")
                .and_then(|w| w.as_u64())
                .filter(|w| *w > 0)
                .ok_or(ProbeError::MissingField("width"))?;
            let height = stream
                .get("height")
                .and_then(|h| h.as_u64())
                .filter(|h| *h > 0)
                .ok_or(ProbeError::MissingField("height"))?;

            Ok(StreamInfo::video(
                start_offset_secs,
                width as u32,
                height as u32,
            ))
        }
    }
}

/// Accept both `"2.145000"` and `2.145`.
fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
