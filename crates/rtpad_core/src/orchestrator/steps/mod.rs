//! Pipeline step implementations.
//!
//! Each step handles one phase of a batch.

mod combine;
mod transcode;
mod validate;

pub use combine::CombineStep;
pub use transcode::TranscodeStep;
pub use validate::ValidateStep;
