//! Probe error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for stream inspection.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The probe tool could not be started.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe tool ran and failed.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Output was not valid JSON.
    #[error("Failed to parse probe output: {0}")]
    Json(#[from] serde_json::Error),

    /// The file has no streams at all.
    #[error("No streams found")]
    NoStreams,

    /// A required field is absent or has the wrong type.
    #[error("Stream is missing '{0}'")]
    MissingField(&'static str),

    /// First stream is neither audio nor video.
    #[error("Unsupported stream type '{0}'")]
    UnsupportedStream(String),
}

/// Result type for stream inspection.
pub type ProbeResult<T> = Result<T, ProbeError>;
