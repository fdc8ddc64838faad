//! Configuration management.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use rtpad_core::config::ConfigManager;
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new("rtpad.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Output dir: {}", config.settings().paths.output_dir);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    AudioSettings, BatchSettings, ConfigSection, EngineSettings, LoggingSettings, PathSettings,
    Settings, VideoSettings,
};
