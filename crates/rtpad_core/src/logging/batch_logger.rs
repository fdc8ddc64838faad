//! Per-batch logger with file and callback output.
//!
//! Each batch gets its own logger that:
//! - Writes to a dedicated log file (when a log directory is configured)
//! - Sends formatted lines to a callback (the CLI prints them to stderr)
//! - Keeps external tool output out of the log in compact mode
//! - Prints the tail of a failed tool's output for error diagnosis

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LineCallback, LogConfig, LogLevel, MessagePrefix};

/// Per-batch logger with dual output (file + callback).
///
/// Safe to share between transcode workers; every write takes a short lock.
pub struct BatchLogger {
    /// Batch name for identification.
    batch_name: String,
    /// Path to log file, if one was opened.
    log_path: Option<PathBuf>,
    /// File writer (buffered).
    file_writer: Arc<Mutex<Option<BufWriter<File>>>>,
    /// Callback for each formatted line.
    line_callback: Arc<Mutex<Option<LineCallback>>>,
    /// Logging configuration.
    config: LogConfig,
}

impl BatchLogger {
    /// Create a new batch logger.
    ///
    /// # Arguments
    /// * `batch_name` - Name of the batch (used in log filename)
    /// * `log_dir` - Directory to write `<batch_name>.log` to, if any
    /// * `config` - Logging configuration
    /// * `line_callback` - Optional callback for each formatted line
    pub fn new(
        batch_name: impl Into<String>,
        log_dir: Option<&Path>,
        config: LogConfig,
        line_callback: Option<LineCallback>,
    ) -> std::io::Result<Self> {
        let batch_name = batch_name.into();

        let (log_path, file_writer) = match log_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let path = dir.join(format!("{}.log", sanitize_filename(&batch_name)));
                let file = File::create(&path)?;
                (Some(path), Some(BufWriter::new(file)))
            }
            None => (None, None),
        };

        Ok(Self {
            batch_name,
            log_path,
            file_writer: Arc::new(Mutex::new(file_writer)),
            line_callback: Arc::new(Mutex::new(line_callback)),
            config,
        })
    }

    /// Get the batch name.
    pub fn batch_name(&self) -> &str {
        &self.batch_name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        let formatted = self.format_message(message);
        self.output(&formatted);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        let msg = MessagePrefix::Warning.format(message);
        self.log(LogLevel::Warn, &msg);
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        let msg = MessagePrefix::Error.format(message);
        self.log(LogLevel::Error, &msg);
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        let msg = MessagePrefix::Command.format(command);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        let msg = MessagePrefix::Phase.format(phase_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a section marker.
    pub fn section(&self, section_name: &str) {
        let msg = MessagePrefix::Section.format(section_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        let msg = MessagePrefix::Success.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Log an output line from an external tool.
    ///
    /// Dropped in compact mode; failures show them through [`show_tail`].
    ///
    /// [`show_tail`]: BatchLogger::show_tail
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        if self.config.compact {
            return;
        }

        let prefix = if is_stderr { "[stderr] " } else { "" };
        let msg = format!("{}{}", prefix, line);
        self.output(&self.format_message(&msg));
    }

    /// Show the last `error_tail` lines of a failed tool's output.
    ///
    /// The lines come from the caller so that concurrent tool runs never
    /// mix their output.
    pub fn show_tail(&self, header: &str, lines: &[&str]) {
        if lines.is_empty() {
            return;
        }

        let skip = lines.len().saturating_sub(self.config.error_tail);
        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in &lines[skip..] {
            self.output(&self.format_message(line));
        }
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the logger and release resources.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            let timestamp = Local::now().format("%H:%M:%S");
            format!("[{}] {}", timestamp, message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, formatted: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", formatted);
        }

        if let Some(ref callback) = *self.line_callback.lock() {
            callback(formatted);
        }
    }
}

impl Drop for BatchLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a string to be safe for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// Builder for creating a BatchLogger with fluent API.
pub struct BatchLoggerBuilder {
    batch_name: String,
    log_dir: Option<PathBuf>,
    config: LogConfig,
    line_callback: Option<LineCallback>,
}

impl BatchLoggerBuilder {
    /// Create a new builder.
    pub fn new(batch_name: impl Into<String>) -> Self {
        Self {
            batch_name: batch_name.into(),
            log_dir: None,
            config: LogConfig::default(),
            line_callback: None,
        }
    }

    /// Write a log file into this directory.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Set the logging configuration.
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the line callback.
    pub fn line_callback(mut self, callback: LineCallback) -> Self {
        self.line_callback = Some(callback);
        self
    }

    /// Build the BatchLogger.
    pub fn build(self) -> std::io::Result<BatchLogger> {
        BatchLogger::new(
            self.batch_name,
            self.log_dir.as_deref(),
            self.config,
            self.line_callback,
        )
    }
}
