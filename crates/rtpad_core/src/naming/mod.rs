//! Raw-tracks filename parsing.
//!
//! Raw-tracks recordings encode their session identity in the file name:
//!
//! ```text
//! 1703174279145-02ce3bcb-bf5b-423f-9699-63fca113a952-cam-audio-1703174279270.webm
//! └─ session start (ms) ─┘└──────── session id (36) ────────┘└ role ─┘└ track start ┘
//! ```
//!
//! The session start is shared by every track recorded in the same session;
//! the trailing track start is only approximate and is not used for
//! alignment (the probed stream start time is).

mod error;

pub use error::{NamingError, NamingResult};

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Extension written by the raw-tracks recorder.
pub const DEFAULT_RAW_EXTENSION: &str = "webm";

/// Length of the session identifier.
pub const SESSION_ID_LEN: usize = 36;

static RAW_TRACK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)-([0-9a-fA-F-]{36})-(.+)-(\d+)\.(\w+)$")
        .expect("raw track filename pattern is valid")
});

/// The parts of a raw-tracks filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTrackName {
    /// Session recording start, milliseconds since the epoch.
    pub session_start_ms: u64,
    /// 36-character session identifier.
    pub session_id: String,
    /// Track role label, e.g. `cam-video`.
    pub track_role: String,
    /// Approximate wall-clock start of this track, milliseconds since the epoch.
    pub approx_track_start_ms: u64,
    /// File extension without the dot.
    pub extension: String,
}

impl RawTrackName {
    /// Parse a file name without checking its extension.
    pub fn parse(file_name: &str) -> NamingResult<Self> {
        let caps = RAW_TRACK_PATTERN
            .captures(file_name)
            .ok_or_else(|| NamingError::malformed(file_name))?;

        let session_start_ms = caps[1]
            .parse()
            .map_err(|_| NamingError::malformed(file_name))?;
        let approx_track_start_ms = caps[4]
            .parse()
            .map_err(|_| NamingError::malformed(file_name))?;

        Ok(Self {
            session_start_ms,
            session_id: caps[2].to_string(),
            track_role: caps[3].to_string(),
            approx_track_start_ms,
            extension: caps[5].to_string(),
        })
    }
}

impl std::fmt::Display for RawTrackName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}.{}",
            self.session_start_ms,
            self.session_id,
            self.track_role,
            self.approx_track_start_ms,
            self.extension
        )
    }
}

/// Parse a raw-tracks path and require the raw-capture extension.
///
/// Only the file name is matched; leading directories are ignored.
pub fn parse_raw_track_path(path: &Path, expected_extension: &str) -> NamingResult<RawTrackName> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| NamingError::malformed(path.display().to_string()))?;

    let name = RawTrackName::parse(file_name)?;

    if name.extension != expected_extension {
        return Err(NamingError::UnsupportedExtension {
            file_name: file_name.to_string(),
            found: name.extension,
            expected: expected_extension.to_string(),
        });
    }

    Ok(name)
}
