//! rtpad core - backend logic for aligning raw-tracks recordings.
//!
//! This crate contains all business logic with zero CLI dependencies:
//! filename parsing, stream probing, padding plans, ffmpeg request
//! building, session pairing and the batch pipeline that ties them together.

pub mod config;
pub mod engine;
pub mod logging;
pub mod models;
pub mod naming;
pub mod orchestrator;
pub mod pairing;
pub mod planning;
pub mod probe;
pub mod transcode;

#[cfg(test)]
pub(crate) mod testing;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
