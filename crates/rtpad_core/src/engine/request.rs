//! Typed engine requests.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::planning::{AudioFormat, VideoSegmentFormat};

/// Kind of engine operation, used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    PadAudio,
    SynthesizePadding,
    TranscodeVideo,
    Concat,
    Mux,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::PadAudio => "pad audio",
            Operation::SynthesizePadding => "synthesize padding",
            Operation::TranscodeVideo => "transcode video",
            Operation::Concat => "concat",
            Operation::Mux => "mux",
        };
        f.write_str(name)
    }
}

/// One invocation of the external engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum EngineRequest {
    /// Resample, then delay by `delay_ms`, then encode.
    ///
    /// The resampler must run before the delay filter; the other order
    /// misplaces the inserted silence.
    PadAudio {
        input: PathBuf,
        output: PathBuf,
        delay_ms: u64,
        format: AudioFormat,
    },
    /// Solid black video lasting `duration_ms`.
    SynthesizePadding {
        output: PathBuf,
        duration_ms: u64,
        format: VideoSegmentFormat,
    },
    /// Re-encode a source video into `format`.
    TranscodeVideo {
        input: PathBuf,
        output: PathBuf,
        format: VideoSegmentFormat,
    },
    /// Join format-identical segments without re-encoding.
    Concat {
        segments: Vec<PathBuf>,
        output: PathBuf,
    },
    /// Combine a video and an audio file without re-encoding.
    Mux {
        video: PathBuf,
        audio: PathBuf,
        output: PathBuf,
    },
}

impl EngineRequest {
    pub fn operation(&self) -> Operation {
        match self {
            EngineRequest::PadAudio { .. } => Operation::PadAudio,
            EngineRequest::SynthesizePadding { .. } => Operation::SynthesizePadding,
            EngineRequest::TranscodeVideo { .. } => Operation::TranscodeVideo,
            EngineRequest::Concat { .. } => Operation::Concat,
            EngineRequest::Mux { .. } => Operation::Mux,
        }
    }

    /// File the request writes.
    pub fn output(&self) -> &Path {
        match self {
            EngineRequest::PadAudio { output, .. }
            | EngineRequest::SynthesizePadding { output, .. }
            | EngineRequest::TranscodeVideo { output, .. }
            | EngineRequest::Concat { output, .. }
            | EngineRequest::Mux { output, .. } => output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_and_output_follow_variant() {
        let concat = EngineRequest::Concat {
            segments: vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")],
            output: PathBuf::from("out.mp4"),
        };
        let mux = EngineRequest::Mux {
            video: PathBuf::from("v.mp4"),
            audio: PathBuf::from("a.aac"),
            output: PathBuf::from("c.mp4"),
        };

        assert_eq!(concat.operation(), Operation::Concat);
        assert_eq!(concat.output(), Path::new("out.mp4"));
        assert_eq!(mux.operation(), Operation::Mux);
        assert_eq!(mux.output(), Path::new("c.mp4"));
    }

    #[test]
    fn serializes_with_operation_tag() {
        let request = EngineRequest::Mux {
            video: PathBuf::from("v.mp4"),
            audio: PathBuf::from("a.aac"),
            output: PathBuf::from("c.mp4"),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"operation\":\"mux\""));
    }
}
