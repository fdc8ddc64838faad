//! ffmpeg adapter for engine requests.

use std::path::Path;
use std::process::Command;

use super::error::{EngineError, EngineResult};
use super::request::EngineRequest;
use super::Engine;
use crate::config::EngineSettings;
use crate::logging::BatchLogger;

/// Engine that runs each request as one `ffmpeg` process.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    /// ffmpeg executable.
    ffmpeg_path: String,
    /// Arguments prepended to every invocation.
    global_args: Vec<String>,
}

impl FfmpegEngine {
    pub fn new(ffmpeg_path: impl Into<String>, global_args: Vec<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            global_args,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.ffmpeg_path.clone(), settings.global_args_tokens())
    }

    /// Full argument list for a request (global args first).
    pub fn build_args(&self, request: &EngineRequest) -> Vec<String> {
        let mut args = self.global_args.clone();
        args.extend(request_args(request));
        args
    }
}

impl Engine for FfmpegEngine {
    fn run(&self, request: &EngineRequest, logger: &BatchLogger) -> EngineResult<()> {
        let operation = request.operation();
        let args = self.build_args(request);

        logger.command(&format!("{} {}", self.ffmpeg_path, args.join(" ")));
        tracing::debug!("Running ffmpeg ({}): {:?}", operation, args);

        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .output()
            .map_err(|source| EngineError::Spawn {
                operation,
                tool: self.ffmpeg_path.clone(),
                source,
            })?;

        let exit_code = result.status.code().unwrap_or(-1);

        if !result.stdout.is_empty() {
            let stdout = String::from_utf8_lossy(&result.stdout);
            for line in stdout.lines() {
                logger.output_line(line, false);
            }
        }
        let stderr = String::from_utf8_lossy(&result.stderr);
        let stderr_lines: Vec<&str> = stderr.lines().collect();
        for line in &stderr_lines {
            logger.output_line(line, true);
        }

        if !result.status.success() {
            logger.show_tail("ffmpeg output", &stderr_lines);
            let message = stderr_lines
                .iter()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim())
                .unwrap_or("no error output")
                .to_string();
            return Err(EngineError::CommandFailed {
                operation,
                tool: self.ffmpeg_path.clone(),
                exit_code,
                message,
            });
        }

        let output = request.output();
        if !output.exists() {
            return Err(EngineError::OutputMissing {
                operation,
                path: output.display().to_string(),
            });
        }

        Ok(())
    }
}

/// Render a request into ffmpeg arguments (without global args).
pub fn request_args(request: &EngineRequest) -> Vec<String> {
    let mut args: Vec<String> = vec!["-y".into()];

    match request {
        EngineRequest::PadAudio {
            input,
            output,
            delay_ms,
            format,
        } => {
            args.extend([
                "-i".into(),
                path_arg(input),
                "-af".into(),
                format!("aresample=async=1,adelay={}:all=true", delay_ms),
                "-b:a".into(),
                format.bitrate.clone(),
                "-acodec".into(),
                format.codec.clone(),
                path_arg(output),
            ]);
        }
        EngineRequest::SynthesizePadding {
            output,
            duration_ms,
            format,
        } => {
            args.extend([
                "-f".into(),
                "lavfi".into(),
                "-i".into(),
                format!("color=c=black:s={}", format.resolution),
                "-t".into(),
                millis_as_secs(*duration_ms),
                "-r".into(),
                format.framerate.clone(),
                "-b:v".into(),
                format.bitrate.clone(),
                "-c:v".into(),
                format.codec.clone(),
                path_arg(output),
            ]);
        }
        EngineRequest::TranscodeVideo {
            input,
            output,
            format,
        } => {
            args.extend([
                "-i".into(),
                path_arg(input),
                "-r".into(),
                format.framerate.clone(),
                "-vf".into(),
                format!(
                    "scale={}:{}",
                    format.resolution.width, format.resolution.height
                ),
                "-b:v".into(),
                format.bitrate.clone(),
                "-c:v".into(),
                format.codec.clone(),
                path_arg(output),
            ]);
        }
        EngineRequest::Concat { segments, output } => {
            let joined = segments
                .iter()
                .map(|s| path_arg(s))
                .collect::<Vec<_>>()
                .join("|");
            args.extend([
                "-i".into(),
                format!("concat:{}", joined),
                "-c".into(),
                "copy".into(),
                path_arg(output),
            ]);
        }
        EngineRequest::Mux {
            video,
            audio,
            output,
        } => {
            args.extend([
                "-i".into(),
                path_arg(video),
                "-i".into(),
                path_arg(audio),
                "-c:v".into(),
                "copy".into(),
                "-c:a".into(),
                "copy".into(),
                path_arg(output),
            ]);
        }
    }

    args
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Whole milliseconds as decimal seconds (`2145` -> `2.145`).
fn millis_as_secs(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}
