//! Alignment planning.
//!
//! Turns a probed track into an [`AlignmentPlan`]: how much blank media to
//! put in front of it and which format both the padding and the content must
//! be encoded in. This module is the only place padding and resolution math
//! happens.
//!
//! # Padding
//!
//! A raw track's first stream starts `start_time` seconds after the session
//! started recording. Prepending exactly that much padding moves every track
//! onto the session timeline:
//!
//! ```text
//! padding_ms = floor(start_time * 1000)      (negative start times clamp to 0)
//! ```
//!
//! # Resolution
//!
//! File-level concatenation only works when padding and content share
//! codec, resolution and framerate, so one [`VideoSegmentFormat`] is computed
//! per track and used for both segments.
//!
//! ```text
//! min_dimension == 0   -> first-frame resolution
//! landscape (w > h)    -> height = m, width  = floor(m * w / h)
//! otherwise            -> width  = m, height = floor(m * h / w)
//! ```

mod types;

pub use types::{AlignmentPlan, AudioFormat, PlanTarget, VideoSegmentFormat};

use crate::config::{AudioSettings, VideoSettings};
use crate::models::{Resolution, StreamInfo, StreamKind};

/// Padding in whole milliseconds for a stream starting `start_offset_secs`
/// after the session start.
pub fn padding_ms(start_offset_secs: f64) -> u64 {
    if !start_offset_secs.is_finite() || start_offset_secs <= 0.0 {
        return 0;
    }
    (start_offset_secs * 1000.0).floor() as u64
}

/// Output resolution for a video track.
///
/// `min_dimension == 0` keeps the native first-frame size. Otherwise the
/// short side is set to `min_dimension` and the long side follows the native
/// aspect ratio, rounded down.
pub fn target_resolution(native: Resolution, min_dimension: u32) -> Resolution {
    if min_dimension == 0 || native.width == 0 || native.height == 0 {
        return native;
    }

    let m = min_dimension as u64;
    let (w, h) = (native.width as u64, native.height as u64);

    if native.is_landscape() {
        Resolution::new((m * w / h) as u32, min_dimension)
    } else {
        Resolution::new(min_dimension, (m * h / w) as u32)
    }
}

/// Build the alignment plan for a probed track.
pub fn plan_alignment(
    stream: &StreamInfo,
    video: &VideoSettings,
    audio: &AudioSettings,
) -> AlignmentPlan {
    let padding_ms = padding_ms(stream.start_offset_secs);

    let target = match stream.kind {
        StreamKind::Audio => PlanTarget::Audio(AudioFormat {
            codec: audio.codec.clone(),
            bitrate: audio.bitrate.clone(),
        }),
        StreamKind::Video { resolution } => PlanTarget::Video(VideoSegmentFormat {
            resolution: target_resolution(resolution, video.min_resolution_dimension),
            framerate: video.framerate.clone(),
            bitrate: video.bitrate.clone(),
            codec: video.codec.clone(),
        }),
    };

    AlignmentPlan { padding_ms, target }
}
