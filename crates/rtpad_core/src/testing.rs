//! Test doubles for the engine and stream inspector.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::engine::{Engine, EngineError, EngineRequest, EngineResult, Operation};
use crate::logging::{BatchLogger, LogConfig};
use crate::models::StreamInfo;
use crate::probe::{ProbeError, ProbeResult, StreamInspector};

/// Logger with no file and no callback.
pub fn test_logger() -> BatchLogger {
    BatchLogger::new("test", None, LogConfig::default(), None).unwrap()
}

/// Engine that records requests and writes empty output files.
#[derive(Default)]
pub struct RecordingEngine {
    requests: Mutex<Vec<EngineRequest>>,
    fail_on: Option<Operation>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every request of `operation`.
    pub fn failing_on(operation: Operation) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on: Some(operation),
        }
    }

    pub fn requests(&self) -> Vec<EngineRequest> {
        self.requests.lock().clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.operation() == operation)
            .count()
    }
}

impl Engine for RecordingEngine {
    fn run(&self, request: &EngineRequest, _logger: &BatchLogger) -> EngineResult<()> {
        self.requests.lock().push(request.clone());
        let operation = request.operation();

        if self.fail_on == Some(operation) {
            return Err(EngineError::CommandFailed {
                operation,
                tool: "fake-ffmpeg".to_string(),
                exit_code: 1,
                message: "forced failure".to_string(),
            });
        }

        std::fs::write(request.output(), b"").map_err(|_| EngineError::OutputMissing {
            operation,
            path: request.output().display().to_string(),
        })
    }
}

/// Inspector answering from a fixed table.
#[derive(Default)]
pub struct FakeInspector {
    streams: HashMap<PathBuf, StreamInfo>,
}

impl FakeInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, info: StreamInfo) -> Self {
        self.streams.insert(path.into(), info);
        self
    }
}

impl StreamInspector for FakeInspector {
    fn inspect(&self, path: &Path) -> ProbeResult<StreamInfo> {
        self.streams
            .get(path)
            .cloned()
            .ok_or_else(|| ProbeError::FileNotFound(path.to_path_buf()))
    }
}
