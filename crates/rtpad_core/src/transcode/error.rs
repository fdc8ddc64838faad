//! Track transcoding errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;

/// Error while moving one track onto the session timeline.
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// The per-track scratch directory could not be created.
    #[error("failed to create scratch directory {path}: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An engine invocation failed.
    #[error("engine invocation failed: {0}")]
    EngineInvocation(#[from] EngineError),
}

/// Result type for track transcoding.
pub type TranscodeResult<T> = Result<T, TranscodeError>;
