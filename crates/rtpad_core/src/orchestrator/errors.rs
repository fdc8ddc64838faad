//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Batch → Step → File → Detail

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;
use crate::naming::NamingError;
use crate::probe::ProbeError;
use crate::transcode::TranscodeError;

/// Top-level pipeline error with batch context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Batch '{batch_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        batch_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        batch_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            batch_name: batch_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// The underlying step error.
    pub fn step_error(&self) -> &StepError {
        match self {
            Self::StepFailed { source, .. } => source,
        }
    }
}

/// Error from a pipeline step with file context.
#[derive(Error, Debug)]
pub enum StepError {
    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// An input name does not follow the raw-tracks grammar.
    #[error(transparent)]
    InvalidFilename(#[from] NamingError),

    /// Inputs come from different recording sessions.
    #[error("start times don't all match: {expected} != {found} ({})", .path.display())]
    SessionStartMismatch {
        path: PathBuf,
        expected: u64,
        found: u64,
    },

    /// Two distinct inputs would write the same padded output.
    #[error("{} and {} share a file name and would overwrite each other's output", .first.display(), .second.display())]
    OutputCollision { first: PathBuf, second: PathBuf },

    /// Probing an input failed.
    #[error("Stream inspection failed for {}: {source}", .path.display())]
    StreamInspection {
        path: PathBuf,
        #[source]
        source: ProbeError,
    },

    /// Padding a track failed.
    #[error("Transcoding {} failed: {source}", .path.display())]
    Transcode {
        path: PathBuf,
        #[source]
        source: TranscodeError,
    },

    /// A direct engine call made by a step failed.
    #[error("Engine invocation for {} failed: {source}", .path.display())]
    EngineInvocation {
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// A precondition was not met.
    #[error("Precondition not met: {0}")]
    PreconditionFailed(String),
}

impl StepError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }

    /// Create a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_names_both_timestamps() {
        let err = StepError::SessionStartMismatch {
            path: PathBuf::from("b.webm"),
            expected: 1703174279145,
            found: 1703174279999,
        };
        let msg = err.to_string();
        assert!(msg.contains("1703174279145 != 1703174279999"));
        assert!(msg.contains("b.webm"));
    }

    #[test]
    fn pipeline_error_chains_context() {
        let step_err = StepError::precondition_failed("validation has not run");
        let pipeline_err = PipelineError::step_failed("batch_xyz", "Transcode", step_err);

        let msg = pipeline_err.to_string();
        assert!(msg.contains("batch_xyz"));
        assert!(msg.contains("Transcode"));
        assert!(matches!(
            pipeline_err.step_error(),
            StepError::PreconditionFailed(_)
        ));
    }
}
