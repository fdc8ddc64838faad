//! Combine step - muxes each session's audio and video into one file.

use crate::engine::EngineRequest;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{BatchState, CombineOutput, Context, StepOutcome};
use crate::pairing::{combined_output_path, group_sessions, PairingAnomaly, PairingDecision};

/// Combine step.
///
/// Runs only when `batch.combine_matching_video_and_audio` is set. Sessions
/// that do not have exactly one audio and one video track are reported as
/// anomalies and left alone.
#[derive(Default)]
pub struct CombineStep;

impl CombineStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for CombineStep {
    fn name(&self) -> &str {
        "Combine"
    }

    fn description(&self) -> &str {
        "Mux matching audio and video tracks of each session"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut BatchState) -> StepResult<StepOutcome> {
        let batch = &ctx.settings.batch;
        if !batch.combine_matching_video_and_audio {
            return Ok(StepOutcome::Skipped(
                "combining video and audio not requested".to_string(),
            ));
        }

        let validation = state
            .validation
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("inputs have not been validated"))?;
        let filename_map = state
            .filename_map()
            .ok_or_else(|| StepError::precondition_failed("tracks have not been transcoded"))?;

        let sessions = group_sessions(validation.named(), &batch.audio_role, &batch.video_role);
        ctx.logger
            .info(&format!("{} session(s) in batch", sessions.len()));

        let mut output = CombineOutput::default();

        for session in &sessions {
            ctx.logger.section(&format!("Session {}", session.session_id));
            let (audio, video) = match session.decide() {
                PairingDecision::Combine { audio, video } => (audio, video),
                PairingDecision::Anomaly(anomaly) => {
                    ctx.logger.warn(&anomaly.to_string());
                    output.anomalies.push(anomaly);
                    continue;
                }
                PairingDecision::NothingToPair => {
                    ctx.logger.debug(&format!(
                        "Session {} has no {} or {} tracks",
                        session.session_id, batch.audio_role, batch.video_role
                    ));
                    continue;
                }
            };

            let padded_audio = filename_map.get(&audio);
            let padded_video = filename_map.get(&video);
            let (padded_audio, padded_video) = match (padded_audio, padded_video) {
                (Some(a), Some(v)) => (a.to_path_buf(), v.to_path_buf()),
                _ => {
                    let input = if padded_audio.is_none() { audio } else { video };
                    let anomaly = PairingAnomaly::MissingOutput {
                        session_id: session.session_id.clone(),
                        input,
                    };
                    ctx.logger.warn(&anomaly.to_string());
                    output.anomalies.push(anomaly);
                    continue;
                }
            };

            ctx.logger.info(&format!(
                "found matching video/audio pair {} / {}",
                padded_audio.display(),
                padded_video.display()
            ));

            let combined = combined_output_path(
                &ctx.output_dir,
                session,
                &ctx.settings.video.output_extension,
            );
            ctx.engine
                .run(
                    &EngineRequest::Mux {
                        video: padded_video,
                        audio: padded_audio,
                        output: combined.clone(),
                    },
                    &ctx.logger,
                )
                .map_err(|source| StepError::EngineInvocation {
                    path: combined.clone(),
                    source,
                })?;

            output.combined.push(combined);
        }

        if !output.anomalies.is_empty() {
            ctx.logger.warn(&format!(
                "{} session(s) could not be combined",
                output.anomalies.len()
            ));
        }

        state.combine = Some(output);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &BatchState) -> StepResult<()> {
        let output = state
            .combine
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Combine results not recorded"))?;

        for path in &output.combined {
            if !path.exists() {
                return Err(StepError::invalid_output(format!(
                    "Combined file missing: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}
