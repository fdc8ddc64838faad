//! Engine error types.

use thiserror::Error;

use super::request::Operation;

/// Error from an engine invocation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine executable could not be started.
    #[error("{operation}: failed to run {tool}: {source}")]
    Spawn {
        operation: Operation,
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and reported failure.
    #[error("{operation}: {tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        operation: Operation,
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The engine reported success but the output file is missing.
    #[error("{operation}: output not created: {path}")]
    OutputMissing { operation: Operation, path: String },
}

impl EngineError {
    /// Which operation failed.
    pub fn operation(&self) -> Operation {
        match self {
            EngineError::Spawn { operation, .. }
            | EngineError::CommandFailed { operation, .. }
            | EngineError::OutputMissing { operation, .. } => *operation,
        }
    }
}

/// Result type for engine invocations.
pub type EngineResult<T> = Result<T, EngineError>;
