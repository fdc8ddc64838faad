//! External transcoding engine.
//!
//! The pipeline never formats command lines itself. It builds typed
//! [`EngineRequest`] values and hands them to an [`Engine`]; the ffmpeg
//! adapter renders them into arguments and runs the process. Tests swap in
//! an engine that only records requests.
//!
//! # Operations
//!
//! | Request | Purpose | Re-encodes |
//! |---|---|---|
//! | `PadAudio` | resample, delay and encode an audio track | yes |
//! | `SynthesizePadding` | black video of a given length | yes |
//! | `TranscodeVideo` | source video in the padding's format | yes |
//! | `Concat` | join segments at the stream level | no |
//! | `Mux` | put padded audio and video in one container | no |

mod error;
mod ffmpeg;
mod request;

pub use error::{EngineError, EngineResult};
pub use ffmpeg::{request_args, FfmpegEngine};
pub use request::{EngineRequest, Operation};

use crate::logging::BatchLogger;

/// Something that can carry out engine requests.
///
/// Every request is attempted exactly once; implementations must not retry.
pub trait Engine: Send + Sync {
    /// Run one request to completion.
    fn run(&self, request: &EngineRequest, logger: &BatchLogger) -> EngineResult<()>;
}
