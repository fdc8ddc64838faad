//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Defaults match the raw-tracks transcode-and-pad tool:
//! 30 fps / 5000k H.264 video in MPEG-TS intermediates, 256k AAC audio.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::naming::DEFAULT_RAW_EXTENSION;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Scratch, output and log locations.
    #[serde(default)]
    pub paths: PathSettings,

    /// External engine invocation.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Video output format.
    #[serde(default)]
    pub video: VideoSettings,

    /// Audio output format.
    #[serde(default)]
    pub audio: AudioSettings,

    /// Batch validation and pairing.
    #[serde(default)]
    pub batch: BatchSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for scratch, output, and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root for per-track scratch directories (padding/content segments).
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,

    /// Folder for padded and combined outputs.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Folder for batch log files. Empty = no log file.
    #[serde(default)]
    pub logs_dir: String,
}

fn default_scratch_dir() -> String {
    std::env::temp_dir().to_string_lossy().to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            scratch_dir: default_scratch_dir(),
            output_dir: default_output_dir(),
            logs_dir: String::new(),
        }
    }
}

/// External engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// ffmpeg executable.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// ffprobe executable.
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    /// Arguments prepended to every ffmpeg invocation.
    #[serde(default = "default_global_args")]
    pub global_args: String,
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_global_args() -> String {
    "-hide_banner -loglevel error -stats".to_string()
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            global_args: default_global_args(),
        }
    }
}

impl EngineSettings {
    /// Global arguments split into tokens.
    pub fn global_args_tokens(&self) -> Vec<String> {
        self.global_args
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Video output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSettings {
    /// Output framerate, passed to ffmpeg `-r`.
    #[serde(default = "default_framerate")]
    pub framerate: String,

    /// Target bitrate, passed to ffmpeg `-b:v`.
    #[serde(default = "default_video_bitrate")]
    pub bitrate: String,

    /// Force the short side to this many pixels. 0 = first-frame resolution.
    #[serde(default)]
    pub min_resolution_dimension: u32,

    /// Video encoder.
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Container for padding/content segments (must support file-level concat).
    #[serde(default = "default_intermediate_extension")]
    pub intermediate_extension: String,

    /// Container for padded and combined outputs.
    #[serde(default = "default_video_extension")]
    pub output_extension: String,
}

fn default_framerate() -> String {
    "30".to_string()
}

fn default_video_bitrate() -> String {
    "5000k".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_intermediate_extension() -> String {
    "ts".to_string()
}

fn default_video_extension() -> String {
    "mp4".to_string()
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            framerate: default_framerate(),
            bitrate: default_video_bitrate(),
            min_resolution_dimension: 0,
            codec: default_video_codec(),
            intermediate_extension: default_intermediate_extension(),
            output_extension: default_video_extension(),
        }
    }
}

/// Audio output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Audio encoder.
    #[serde(default = "default_audio_codec")]
    pub codec: String,

    /// Target bitrate, passed to ffmpeg `-b:a`.
    #[serde(default = "default_audio_bitrate")]
    pub bitrate: String,

    /// Container for padded audio outputs.
    #[serde(default = "default_audio_extension")]
    pub output_extension: String,
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_bitrate() -> String {
    "256k".to_string()
}

fn default_audio_extension() -> String {
    "aac".to_string()
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            codec: default_audio_codec(),
            bitrate: default_audio_bitrate(),
            output_extension: default_audio_extension(),
        }
    }
}

/// Batch validation and pairing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Extension every raw-tracks input must have.
    #[serde(default = "default_raw_extension")]
    pub raw_extension: String,

    /// Skip filename validation and the shared session-start check.
    #[serde(default)]
    pub allow_any_filename_format: bool,

    /// Mux matching audio/video tracks of a session into one file.
    #[serde(default)]
    pub combine_matching_video_and_audio: bool,

    /// Track role paired as the audio side.
    #[serde(default = "default_audio_role")]
    pub audio_role: String,

    /// Track role paired as the video side.
    #[serde(default = "default_video_role")]
    pub video_role: String,

    /// Number of tracks transcoded at the same time.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,
}

fn default_raw_extension() -> String {
    DEFAULT_RAW_EXTENSION.to_string()
}

fn default_audio_role() -> String {
    "cam-audio".to_string()
}

fn default_video_role() -> String {
    "cam-video".to_string()
}

fn default_max_parallel() -> usize {
    1
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            raw_extension: default_raw_extension(),
            allow_any_filename_format: false,
            combine_matching_video_and_audio: false,
            audio_role: default_audio_role(),
            video_role: default_video_role(),
            max_parallel: default_max_parallel(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level written by the batch logger.
    #[serde(default)]
    pub level: LogLevel,

    /// Hide ffmpeg output lines unless a step fails.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of tool output lines to show on failure.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Prefix log lines with a timestamp.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

/// Names of config sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Engine,
    Video,
    Audio,
    Batch,
    Logging,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 6] = [
        ConfigSection::Paths,
        ConfigSection::Engine,
        ConfigSection::Video,
        ConfigSection::Audio,
        ConfigSection::Batch,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Engine => "engine",
            ConfigSection::Video => "video",
            ConfigSection::Audio => "audio",
            ConfigSection::Batch => "batch",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "Scratch, output and log directories",
            ConfigSection::Engine => "ffmpeg / ffprobe invocation",
            ConfigSection::Video => "Padded video output format",
            ConfigSection::Audio => "Padded audio output format",
            ConfigSection::Batch => "Filename validation and audio/video pairing",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
