//! Pipeline step trait definition.
//!
//! All pipeline steps implement this trait, providing a consistent
//! interface for validation and execution.

use super::errors::StepResult;
use super::types::{BatchState, Context, StepOutcome};

/// Trait for pipeline steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced valid output
///
/// # Example
///
/// ```ignore
/// struct ListStep;
///
/// impl PipelineStep for ListStep {
///     fn name(&self) -> &str { "List" }
///
///     fn validate_input(&self, ctx: &Context) -> StepResult<()> {
///         if ctx.inputs.is_empty() {
///             return Err(StepError::invalid_input("No input files"));
///         }
///         Ok(())
///     }
///
///     fn execute(&self, ctx: &Context, _state: &mut BatchState) -> StepResult<StepOutcome> {
///         for input in &ctx.inputs {
///             ctx.logger.info(&input.display().to_string());
///         }
///         Ok(StepOutcome::Success)
///     }
///
///     fn validate_output(&self, _ctx: &Context, _state: &BatchState) -> StepResult<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait PipelineStep: Send + Sync {
    /// Get the step name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    ///
    /// Called before `execute`. Should check that all required
    /// preconditions are met (files exist, previous steps completed, etc.).
    fn validate_input(&self, ctx: &Context) -> StepResult<()>;

    /// Execute the step's main work.
    ///
    /// Should perform the step's processing and record results in `state`.
    /// Returns `StepOutcome::Skipped` if the step determined it should not
    /// run (not an error).
    fn execute(&self, ctx: &Context, state: &mut BatchState) -> StepResult<StepOutcome>;

    /// Validate outputs after execution.
    ///
    /// Called after `execute` returns `Success`.
    fn validate_output(&self, ctx: &Context, state: &BatchState) -> StepResult<()>;

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}
