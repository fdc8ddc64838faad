//! Validate step - checks raw-tracks filenames and the shared session start.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::naming::parse_raw_track_path;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{BatchState, Context, NamedInput, StepOutcome, ValidationOutput};

/// Validate step.
///
/// Parses every input name and requires all inputs to share one session
/// start. With `allow_any_filename_format` names are only parsed when
/// combining needs them, and the session-start check is skipped.
/// Distinct inputs sharing a file name are always rejected, since padded
/// outputs are named after the input's file name.
#[derive(Default)]
pub struct ValidateStep;

impl ValidateStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for ValidateStep {
    fn name(&self) -> &str {
        "Validate"
    }

    fn description(&self) -> &str {
        "Check raw-tracks filenames and session start times"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if ctx.inputs.is_empty() {
            return Err(StepError::invalid_input("No input files"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut BatchState) -> StepResult<StepOutcome> {
        let batch = &ctx.settings.batch;
        let parse_names = !batch.allow_any_filename_format || batch.combine_matching_video_and_audio;

        check_output_names(&ctx.inputs)?;

        if !parse_names {
            ctx.logger
                .info("Filename validation skipped (any filename format allowed)");
            state.validation = Some(ValidationOutput {
                inputs: ctx
                    .inputs
                    .iter()
                    .map(|path| NamedInput {
                        path: path.clone(),
                        name: None,
                    })
                    .collect(),
                session_start_ms: None,
            });
            return Ok(StepOutcome::Success);
        }

        let mut inputs = Vec::with_capacity(ctx.inputs.len());
        let mut session_start: Option<u64> = None;

        for path in &ctx.inputs {
            let name = parse_raw_track_path(path, &batch.raw_extension)?;
            ctx.logger.debug(&format!(
                "{}: session {} role {} start {}",
                path.display(),
                name.session_id,
                name.track_role,
                name.session_start_ms
            ));

            if !batch.allow_any_filename_format {
                match session_start {
                    None => session_start = Some(name.session_start_ms),
                    Some(expected) if expected != name.session_start_ms => {
                        return Err(StepError::SessionStartMismatch {
                            path: path.clone(),
                            expected,
                            found: name.session_start_ms,
                        });
                    }
                    Some(_) => {}
                }
            }

            inputs.push(NamedInput {
                path: path.clone(),
                name: Some(name),
            });
        }

        if let Some(start) = session_start {
            ctx.logger.info(&format!(
                "{} input(s) share session start {}",
                inputs.len(),
                start
            ));
        }

        state.validation = Some(ValidationOutput {
            inputs,
            session_start_ms: session_start,
        });

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, ctx: &Context, state: &BatchState) -> StepResult<()> {
        match &state.validation {
            Some(v) if v.inputs.len() == ctx.inputs.len() => Ok(()),
            Some(_) => Err(StepError::invalid_output(
                "Validation did not cover every input",
            )),
            None => Err(StepError::invalid_output("Validation not recorded")),
        }
    }
}

/// Rejects two different paths with the same file name. A path listed
/// twice maps to the same output and is allowed.
fn check_output_names(inputs: &[PathBuf]) -> StepResult<()> {
    let mut seen: HashMap<&OsStr, &Path> = HashMap::new();
    for path in inputs {
        let Some(file_name) = path.file_name() else {
            return Err(StepError::invalid_input(format!(
                "{} has no file name",
                path.display()
            )));
        };
        match seen.get(file_name) {
            Some(first) if *first != path.as_path() => {
                return Err(StepError::OutputCollision {
                    first: first.to_path_buf(),
                    second: path.clone(),
                });
            }
            Some(_) => {}
            None => {
                seen.insert(file_name, path);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_file_name_in_two_directories_collides() {
        let inputs = vec![PathBuf::from("/a/x.webm"), PathBuf::from("/b/x.webm")];
        match check_output_names(&inputs) {
            Err(StepError::OutputCollision { first, second }) => {
                assert_eq!(first, PathBuf::from("/a/x.webm"));
                assert_eq!(second, PathBuf::from("/b/x.webm"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn repeated_path_is_not_a_collision() {
        let inputs = vec![
            PathBuf::from("/a/x.webm"),
            PathBuf::from("/a/y.webm"),
            PathBuf::from("/a/x.webm"),
        ];
        assert!(check_output_names(&inputs).is_ok());
    }
}
