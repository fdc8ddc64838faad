//! Stream inspection.
//!
//! The pipeline only needs three facts about an input: when its first
//! stream starts, whether it is audio or video, and (for video) the size of
//! the first frame. [`StreamInspector`] is the port the pipeline talks to;
//! [`FfprobeInspector`] answers it by running `ffprobe`.

mod ffprobe;
mod types;

pub use ffprobe::{parse_ffprobe_json, FfprobeInspector};
pub use types::{ProbeError, ProbeResult};

use std::path::Path;

use crate::models::StreamInfo;

/// Read-only probe of a media file.
pub trait StreamInspector: Send + Sync {
    /// Inspect the first stream of `path`.
    fn inspect(&self, path: &Path) -> ProbeResult<StreamInfo>;
}
