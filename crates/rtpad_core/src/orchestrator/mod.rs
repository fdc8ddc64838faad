//! Pipeline orchestrator for coordinating batch execution.
//!
//! A batch is the set of raw-tracks files given on one command line. It
//! runs as a sequence of steps over a read-only [`Context`] and a
//! write-once [`BatchState`].
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Step: Validate   (filenames, shared session start)
//!     ├── Step: Transcode  (probe, plan, pad each track)
//!     └── Step: Combine    (mux session audio + video, optional)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rtpad_core::orchestrator::{run_batch, Context};
//!
//! let ctx = Context::new(inputs, settings, "batch", logger, engine, inspector);
//! let state = run_batch(&ctx)?;
//! println!("Outputs: {:?}", state.filename_map());
//! ```

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{CombineStep, TranscodeStep, ValidateStep};
pub use types::{
    BatchState, CombineOutput, Context, NamedInput, ProgressCallback, StepOutcome,
    TranscodeOutput, ValidationOutput,
};

use uuid::Uuid;

/// Create a standard pipeline with all steps in the correct order.
///
/// 1. Validate - check filenames and the shared session start
/// 2. Transcode - pad every track onto the session timeline
/// 3. Combine - mux matching audio/video per session (when enabled)
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(ValidateStep::new())
        .with_step(TranscodeStep::new())
        .with_step(CombineStep::new())
}

/// Run the standard pipeline over a fresh batch state.
pub fn run_batch(ctx: &Context) -> PipelineResult<BatchState> {
    let mut state = BatchState::new(Uuid::new_v4().to_string());
    ctx.logger.info(&format!(
        "Batch {} ({} input(s))",
        state.batch_id,
        ctx.inputs.len()
    ));

    let result = create_standard_pipeline().run(ctx, &mut state)?;
    tracing::debug!(
        "Batch {} finished: {} completed, {} skipped",
        state.batch_id,
        result.steps_completed.len(),
        result.steps_skipped.len()
    );

    Ok(state)
}
