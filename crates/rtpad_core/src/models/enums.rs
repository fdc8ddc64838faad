//! Core enums used throughout the crate.

use serde::{Deserialize, Serialize};

/// Kind of media carried by a track file.
///
/// Raw-tracks recordings hold exactly one stream, so a track is either
/// audio or video and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Parse an ffprobe `codec_type` value.
    pub fn from_codec_type(codec_type: &str) -> Option<Self> {
        match codec_type {
            "audio" => Some(MediaKind::Audio),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_type_maps_to_kind() {
        assert_eq!(MediaKind::from_codec_type("audio"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_codec_type("video"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_codec_type("subtitle"), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&MediaKind::Video).unwrap();
        assert_eq!(json, "\"video\"");
    }
}
