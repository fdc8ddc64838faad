//! Data models shared across the crate.
//!
//! - Enums for media kinds
//! - Media structures (resolutions, probed streams, track files)
//! - Batch bookkeeping (input -> output filename map)

mod batch;
mod enums;
mod media;

pub use batch::FilenameMap;
pub use enums::MediaKind;
pub use media::{Resolution, StreamInfo, StreamKind, TrackFile};
