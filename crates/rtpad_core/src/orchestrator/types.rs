//! Core types for the orchestrator pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::engine::Engine;
use crate::logging::BatchLogger;
use crate::models::FilenameMap;
use crate::naming::RawTrackName;
use crate::pairing::PairingAnomaly;
use crate::probe::StreamInspector;
use crate::transcode::TranscodedTrack;

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (step_name, percent_complete, message)
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Read-only context passed to pipeline steps.
///
/// Contains batch configuration and shared resources that steps can read
/// but not modify. Mutable state goes in `BatchState`.
pub struct Context {
    /// Input tracks, in command-line order.
    pub inputs: Vec<PathBuf>,
    /// Application settings.
    pub settings: Settings,
    /// Batch name/identifier.
    pub batch_name: String,
    /// Root for per-track scratch directories.
    pub scratch_root: PathBuf,
    /// Output directory for padded and combined files.
    pub output_dir: PathBuf,
    /// Per-batch logger.
    pub logger: Arc<BatchLogger>,
    /// Transcoding engine.
    pub engine: Arc<dyn Engine>,
    /// Stream probe.
    pub inspector: Arc<dyn StreamInspector>,
    /// Optional progress callback.
    progress_callback: Option<ProgressCallback>,
}

impl Context {
    /// Create a new context for a batch.
    ///
    /// Scratch and output locations are taken from `settings.paths`.
    pub fn new(
        inputs: Vec<PathBuf>,
        settings: Settings,
        batch_name: impl Into<String>,
        logger: Arc<BatchLogger>,
        engine: Arc<dyn Engine>,
        inspector: Arc<dyn StreamInspector>,
    ) -> Self {
        let scratch_root = PathBuf::from(&settings.paths.scratch_dir);
        let output_dir = PathBuf::from(&settings.paths.output_dir);
        Self {
            inputs,
            settings,
            batch_name: batch_name.into(),
            scratch_root,
            output_dir,
            logger,
            engine,
            inspector,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Report progress to callback (if set).
    pub fn report_progress(&self, step_name: &str, percent: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(step_name, percent, message);
        }
    }
}

/// Mutable batch state that accumulates results from pipeline steps.
///
/// This is the "write-once manifest" - steps add their own section and do
/// not overwrite earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchState {
    /// Unique batch identifier.
    pub batch_id: String,
    /// When the batch started.
    pub started_at: Option<String>,
    /// Filename validation results (from Validate step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOutput>,
    /// Padded outputs (from Transcode step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcode: Option<TranscodeOutput>,
    /// Combined outputs and anomalies (from Combine step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combine: Option<CombineOutput>,
}

impl BatchState {
    /// Create a new batch state with the given ID.
    pub fn new(batch_id: impl Into<String>) -> Self {
        Self {
            batch_id: batch_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Input -> padded output map (if transcoding completed).
    pub fn filename_map(&self) -> Option<&FilenameMap> {
        self.transcode.as_ref().map(|t| &t.filename_map)
    }

    /// Pairing anomalies reported by the Combine step.
    pub fn anomalies(&self) -> &[PairingAnomaly] {
        self.combine
            .as_ref()
            .map(|c| c.anomalies.as_slice())
            .unwrap_or(&[])
    }
}

/// An input and its parsed raw-tracks name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedInput {
    pub path: PathBuf,
    /// Absent when filename parsing was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<RawTrackName>,
}

/// Output from the Validate step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutput {
    /// One entry per input, in input order.
    pub inputs: Vec<NamedInput>,
    /// Session start shared by every input, when checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_start_ms: Option<u64>,
}

impl ValidationOutput {
    /// Inputs that carry a parsed name.
    pub fn named(&self) -> impl Iterator<Item = (&Path, &RawTrackName)> {
        self.inputs
            .iter()
            .filter_map(|i| i.name.as_ref().map(|n| (i.path.as_path(), n)))
    }
}

/// Output from the Transcode step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscodeOutput {
    /// Input -> padded output, in input order.
    pub filename_map: FilenameMap,
    /// Per-track records, in input order.
    pub tracks: Vec<TranscodedTrack>,
}

/// Output from the Combine step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombineOutput {
    /// Combined audio+video files.
    pub combined: Vec<PathBuf>,
    /// Sessions that could not be combined.
    pub anomalies: Vec<PairingAnomaly>,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (preconditions not met, but not an error).
    Skipped(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_state_tracks_completion() {
        let mut state = BatchState::new("test-123");
        assert!(state.filename_map().is_none());
        assert!(state.anomalies().is_empty());

        state.transcode = Some(TranscodeOutput::default());
        assert!(state.filename_map().unwrap().is_empty());
    }

    #[test]
    fn batch_state_serializes() {
        let state = BatchState::new("test-456");
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"batch_id\":\"test-456\""));
        assert!(!json.contains("transcode"));
    }

    #[test]
    fn named_skips_unparsed_inputs() {
        let name = RawTrackName::parse(
            "1703174279145-02ce3bcb-bf5b-423f-9699-63fca113a952-cam-audio-1703174279270.webm",
        )
        .unwrap();
        let output = ValidationOutput {
            inputs: vec![
                NamedInput {
                    path: PathBuf::from("a.webm"),
                    name: Some(name.clone()),
                },
                NamedInput {
                    path: PathBuf::from("any.mkv"),
                    name: None,
                },
            ],
            session_start_ms: None,
        };

        let named: Vec<_> = output.named().collect();
        assert_eq!(named, vec![(Path::new("a.webm"), &name)]);
    }
}
