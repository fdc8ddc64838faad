//! Filename parsing errors.

use thiserror::Error;

/// Why a file name is not a usable raw-tracks name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// The name does not follow `<start>-<session id>-<role>-<track start>.<ext>`.
    #[error("filename {file_name} does not match expected pattern")]
    MalformedFilename { file_name: String },

    /// The name parses but the recording is not in the raw-capture format.
    #[error("filename {file_name} does not have {expected} extension (found {found})")]
    UnsupportedExtension {
        file_name: String,
        found: String,
        expected: String,
    },
}

impl NamingError {
    /// Create a malformed filename error.
    pub fn malformed(file_name: impl Into<String>) -> Self {
        Self::MalformedFilename {
            file_name: file_name.into(),
        }
    }
}

/// Result type for filename parsing.
pub type NamingResult<T> = Result<T, NamingError>;
