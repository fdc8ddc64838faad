//! Media structures: resolutions, probed streams and track files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::enums::MediaKind;
use crate::naming::RawTrackName;

/// Frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the frame is wider than it is tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What the first stream of a track file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StreamKind {
    Audio,
    /// Video, with the size of the first decodable frame.
    Video { resolution: Resolution },
}

impl StreamKind {
    pub fn media_kind(&self) -> MediaKind {
        match self {
            StreamKind::Audio => MediaKind::Audio,
            StreamKind::Video { .. } => MediaKind::Video,
        }
    }
}

/// Result of probing a track file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// First-stream start time in seconds, relative to the session start.
    pub start_offset_secs: f64,
    pub kind: StreamKind,
}

impl StreamInfo {
    pub fn audio(start_offset_secs: f64) -> Self {
        Self {
            start_offset_secs,
            kind: StreamKind::Audio,
        }
    }

    pub fn video(start_offset_secs: f64, width: u32, height: u32) -> Self {
        Self {
            start_offset_secs,
            kind: StreamKind::Video {
                resolution: Resolution::new(width, height),
            },
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        self.kind.media_kind()
    }
}

/// One input track: where it lives, what its name says, what the probe saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFile {
    pub path: PathBuf,
    /// Parsed filename, absent when arbitrary filenames are allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<RawTrackName>,
    pub stream: StreamInfo,
}

impl TrackFile {
    pub fn new(path: impl Into<PathBuf>, name: Option<RawTrackName>, stream: StreamInfo) -> Self {
        Self {
            path: path.into(),
            name,
            stream,
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        self.stream.media_kind()
    }

    /// File name component of the input path.
    pub fn base_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
