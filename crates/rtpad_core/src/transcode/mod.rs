//! Track transcoding.
//!
//! Drives the engine for one track according to its [`AlignmentPlan`]:
//!
//! - audio: a single resample + delay + encode request;
//! - video: black padding and re-encoded content in a shared format inside a
//!   per-track scratch directory, then a stream-copy concat into the final
//!   container.
//!
//! Requests run strictly in order and are never retried; the first failure
//! ends the track.

mod error;
mod scratch;

pub use error::{TranscodeError, TranscodeResult};
pub use scratch::{ScratchSpace, SCRATCH_PREFIX};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{AudioSettings, Settings, VideoSettings};
use crate::engine::{Engine, EngineRequest};
use crate::logging::BatchLogger;
use crate::models::TrackFile;
use crate::planning::{plan_alignment, AlignmentPlan, AudioFormat, PlanTarget, VideoSegmentFormat};

/// Record of a track that was padded successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscodedTrack {
    pub input: PathBuf,
    pub output: PathBuf,
    pub plan: AlignmentPlan,
}

/// `<output_dir>/<input file name>.padded.<extension>`
pub fn padded_output_path(output_dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let base_name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());
    output_dir.join(format!("{}.padded.{}", base_name, extension))
}

/// Transcodes tracks into padded outputs.
pub struct TrackTranscoder<'a> {
    engine: &'a dyn Engine,
    logger: &'a BatchLogger,
    video: &'a VideoSettings,
    audio: &'a AudioSettings,
    scratch_root: &'a Path,
    output_dir: &'a Path,
}

impl<'a> TrackTranscoder<'a> {
    pub fn new(
        engine: &'a dyn Engine,
        logger: &'a BatchLogger,
        settings: &'a Settings,
        scratch_root: &'a Path,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            engine,
            logger,
            video: &settings.video,
            audio: &settings.audio,
            scratch_root,
            output_dir,
        }
    }

    /// Final output path for a track of the given plan.
    pub fn output_path(&self, track: &TrackFile, plan: &AlignmentPlan) -> PathBuf {
        let extension = match plan.target {
            PlanTarget::Audio(_) => &self.audio.output_extension,
            PlanTarget::Video(_) => &self.video.output_extension,
        };
        padded_output_path(self.output_dir, &track.path, extension)
    }

    /// Plan and transcode one track.
    pub fn transcode(&self, track: &TrackFile) -> TranscodeResult<TranscodedTrack> {
        let plan = plan_alignment(&track.stream, self.video, self.audio);
        let output = self.output_path(track, &plan);

        std::fs::create_dir_all(self.output_dir).map_err(|source| TranscodeError::OutputDir {
            path: self.output_dir.to_path_buf(),
            source,
        })?;

        self.logger.info(&format!(
            "{} ({}): padding {} ms -> {}",
            track.base_name(),
            plan.media_kind(),
            plan.padding_ms,
            output.display()
        ));

        match &plan.target {
            PlanTarget::Audio(format) => {
                self.pad_audio(&track.path, &output, plan.padding_ms, format)?
            }
            PlanTarget::Video(format) => {
                self.pad_video(&track.path, &output, plan.padding_ms, format)?
            }
        }

        Ok(TranscodedTrack {
            input: track.path.clone(),
            output,
            plan,
        })
    }

    fn pad_audio(
        &self,
        input: &Path,
        output: &Path,
        delay_ms: u64,
        format: &AudioFormat,
    ) -> TranscodeResult<()> {
        self.engine.run(
            &EngineRequest::PadAudio {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
                delay_ms,
                format: format.clone(),
            },
            self.logger,
        )?;
        Ok(())
    }

    fn pad_video(
        &self,
        input: &Path,
        output: &Path,
        padding_ms: u64,
        format: &VideoSegmentFormat,
    ) -> TranscodeResult<()> {
        let scratch =
            ScratchSpace::create(self.scratch_root).map_err(|source| TranscodeError::Scratch {
                path: self.scratch_root.to_path_buf(),
                source,
            })?;
        let extension = &self.video.intermediate_extension;
        tracing::debug!("Scratch directory: {}", scratch.path().display());

        let mut segments = Vec::with_capacity(2);

        if padding_ms > 0 {
            let padding = scratch.segment("padding", extension);
            self.engine.run(
                &EngineRequest::SynthesizePadding {
                    output: padding.clone(),
                    duration_ms: padding_ms,
                    format: format.clone(),
                },
                self.logger,
            )?;
            segments.push(padding);
        }

        let content = scratch.segment("content", extension);
        self.engine.run(
            &EngineRequest::TranscodeVideo {
                input: input.to_path_buf(),
                output: content.clone(),
                format: format.clone(),
            },
            self.logger,
        )?;
        segments.push(content);

        self.engine.run(
            &EngineRequest::Concat {
                segments,
                output: output.to_path_buf(),
            },
            self.logger,
        )?;

        let dir = scratch.path().to_path_buf();
        if let Err(e) = scratch.remove() {
            self.logger.warn(&format!(
                "Could not remove scratch directory {}: {}",
                dir.display(),
                e
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Operation;
    use crate::models::StreamInfo;
    use crate::testing::{test_logger, RecordingEngine};
    use tempfile::tempdir;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn output_keeps_input_file_name() {
        let out = padded_output_path(Path::new("out"), Path::new("/in/a-cam-audio.webm"), "aac");
        assert_eq!(out, PathBuf::from("out/a-cam-audio.webm.padded.aac"));
    }

    #[test]
    fn audio_is_one_request_with_floored_delay() {
        let dir = tempdir().unwrap();
        let engine = RecordingEngine::new();
        let logger = test_logger();
        let settings = settings();
        let out_dir = dir.path().join("out");
        let transcoder =
            TrackTranscoder::new(&engine, &logger, &settings, dir.path(), &out_dir);

        let track = TrackFile::new("/in/mic.webm", None, StreamInfo::audio(2.145));
        let result = transcoder.transcode(&track).unwrap();

        let requests = engine.requests();
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            EngineRequest::PadAudio {
                delay_ms, format, ..
            } => {
                assert_eq!(*delay_ms, 2145);
                assert_eq!(format.codec, "aac");
                assert_eq!(format.bitrate, "256k");
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert_eq!(result.output, out_dir.join("mic.webm.padded.aac"));
    }

    #[test]
    fn video_pads_then_transcodes_then_concats() {
        let dir = tempdir().unwrap();
        let engine = RecordingEngine::new();
        let logger = test_logger();
        let mut settings = settings();
        settings.video.min_resolution_dimension = 720;
        let out_dir = dir.path().join("out");
        let scratch_root = dir.path().join("scratch");
        let transcoder =
            TrackTranscoder::new(&engine, &logger, &settings, &scratch_root, &out_dir);

        let track = TrackFile::new("/in/cam.webm", None, StreamInfo::video(1.5, 640, 360));
        let result = transcoder.transcode(&track).unwrap();

        let requests = engine.requests();
        let ops: Vec<_> = requests.iter().map(|r| r.operation()).collect();
        assert_eq!(
            ops,
            vec![
                Operation::SynthesizePadding,
                Operation::TranscodeVideo,
                Operation::Concat
            ]
        );

        let (padding_format, padding_out, duration) = match &requests[0] {
            EngineRequest::SynthesizePadding {
                format,
                output,
                duration_ms,
            } => (format, output, *duration_ms),
            other => panic!("unexpected request {:?}", other),
        };
        let (content_format, content_out) = match &requests[1] {
            EngineRequest::TranscodeVideo { format, output, .. } => (format, output),
            other => panic!("unexpected request {:?}", other),
        };

        assert_eq!(duration, 1500);
        assert_eq!(padding_format, content_format);
        assert_eq!(padding_format.resolution.to_string(), "1280x720");
        assert_eq!(padding_out.parent(), content_out.parent());
        assert!(padding_out.ends_with("padding.ts"));

        match &requests[2] {
            EngineRequest::Concat { segments, output } => {
                assert_eq!(segments, &vec![padding_out.clone(), content_out.clone()]);
                assert_eq!(output, &out_dir.join("cam.webm.padded.mp4"));
            }
            other => panic!("unexpected request {:?}", other),
        }

        // Scratch removed after success.
        assert!(!padding_out.parent().unwrap().exists());
        assert_eq!(result.plan.padding_ms, 1500);
    }

    #[test]
    fn zero_padding_concats_content_alone() {
        let dir = tempdir().unwrap();
        let engine = RecordingEngine::new();
        let logger = test_logger();
        let settings = settings();
        let transcoder =
            TrackTranscoder::new(&engine, &logger, &settings, dir.path(), dir.path());

        let track = TrackFile::new("cam.webm", None, StreamInfo::video(0.0, 1280, 720));
        transcoder.transcode(&track).unwrap();

        let requests = engine.requests();
        assert_eq!(requests.len(), 2);
        match &requests[1] {
            EngineRequest::Concat { segments, .. } => {
                assert_eq!(segments.len(), 1);
                assert!(segments[0].ends_with("content.ts"));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn failure_stops_track_and_keeps_scratch() {
        let dir = tempdir().unwrap();
        let engine = RecordingEngine::failing_on(Operation::TranscodeVideo);
        let logger = test_logger();
        let settings = settings();
        let scratch_root = dir.path().join("scratch");
        let transcoder =
            TrackTranscoder::new(&engine, &logger, &settings, &scratch_root, dir.path());

        let track = TrackFile::new("cam.webm", None, StreamInfo::video(3.0, 1280, 720));
        let err = transcoder.transcode(&track).unwrap_err();

        assert!(matches!(err, TranscodeError::EngineInvocation(_)));
        // Concat never attempted.
        assert_eq!(engine.requests().len(), 2);
        assert_eq!(std::fs::read_dir(&scratch_root).unwrap().count(), 1);
    }
}
