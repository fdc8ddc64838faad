//! Pairing anomalies.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A session that could not be combined.
///
/// Anomalies are reported as warnings; they never fail a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairingAnomaly {
    /// Session has an audio track and no video track.
    #[error("found only audio track for {}", .path.display())]
    AudioOnly { session_id: String, path: PathBuf },

    /// Session has a video track and no audio track.
    #[error("found only video track for {}", .path.display())]
    VideoOnly { session_id: String, path: PathBuf },

    /// Session has more than one track of a role.
    #[error("found more than one audio or video track in session {session_id}: audio {audio:?}, video {video:?}")]
    Ambiguous {
        session_id: String,
        audio: Vec<PathBuf>,
        video: Vec<PathBuf>,
    },

    /// A paired input has no padded output to combine.
    #[error("no padded output recorded for {}", .input.display())]
    MissingOutput { session_id: String, input: PathBuf },
}

impl PairingAnomaly {
    pub fn session_id(&self) -> &str {
        match self {
            PairingAnomaly::AudioOnly { session_id, .. }
            | PairingAnomaly::VideoOnly { session_id, .. }
            | PairingAnomaly::Ambiguous { session_id, .. }
            | PairingAnomaly::MissingOutput { session_id, .. } => session_id,
        }
    }
}
