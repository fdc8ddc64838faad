//! Alignment plan types.

use serde::{Deserialize, Serialize};

use crate::models::{MediaKind, Resolution};

/// Encoding parameters shared by a video track's padding and content
/// segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSegmentFormat {
    pub resolution: Resolution,
    /// ffmpeg `-r` value.
    pub framerate: String,
    /// ffmpeg `-b:v` value.
    pub bitrate: String,
    /// ffmpeg `-c:v` value.
    pub codec: String,
}

/// Encoding parameters for a padded audio track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// ffmpeg `-acodec` value.
    pub codec: String,
    /// ffmpeg `-b:a` value.
    pub bitrate: String,
}

/// Output format of a plan, one case per media kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlanTarget {
    Audio(AudioFormat),
    Video(VideoSegmentFormat),
}

/// How one track is moved onto the session timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentPlan {
    /// Blank media to prepend, in milliseconds.
    pub padding_ms: u64,
    pub target: PlanTarget,
}

impl AlignmentPlan {
    pub fn media_kind(&self) -> MediaKind {
        match self.target {
            PlanTarget::Audio(_) => MediaKind::Audio,
            PlanTarget::Video(_) => MediaKind::Video,
        }
    }

    pub fn video_format(&self) -> Option<&VideoSegmentFormat> {
        match &self.target {
            PlanTarget::Video(format) => Some(format),
            PlanTarget::Audio(_) => None,
        }
    }
}
