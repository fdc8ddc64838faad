//! Transcode step - probes and pads every input track.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::models::{FilenameMap, TrackFile};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{BatchState, Context, NamedInput, StepOutcome, TranscodeOutput};
use crate::transcode::{TrackTranscoder, TranscodedTrack};

type Slot = Option<StepResult<TranscodedTrack>>;

/// Transcode step.
///
/// Tracks are spread over `batch.max_parallel` workers. Once any track
/// fails no further track is started. The filename map is assembled in
/// input order after every worker has finished. Repeated inputs are padded
/// once.
#[derive(Default)]
pub struct TranscodeStep;

impl TranscodeStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for TranscodeStep {
    fn name(&self) -> &str {
        "Transcode"
    }

    fn description(&self) -> &str {
        "Pad and transcode each track onto the session timeline"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        std::fs::create_dir_all(&ctx.output_dir)
            .map_err(|e| StepError::io_error("creating output directory", e))?;
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut BatchState) -> StepResult<StepOutcome> {
        let validation = state
            .validation
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("inputs have not been validated"))?;
        // A path listed more than once is padded once.
        let mut inputs: Vec<&NamedInput> = Vec::with_capacity(validation.inputs.len());
        for input in &validation.inputs {
            if !inputs.iter().any(|seen| seen.path == input.path) {
                inputs.push(input);
            }
        }
        let total = inputs.len();
        let workers = ctx.settings.batch.max_parallel.clamp(1, total.max(1));

        ctx.logger.info(&format!(
            "Transcoding {} track(s) with {} worker(s)",
            total, workers
        ));

        let next = AtomicUsize::new(0);
        let failed = AtomicBool::new(false);
        let done = AtomicUsize::new(0);
        let slots: Mutex<Vec<Slot>> = Mutex::new((0..total).map(|_| None).collect());

        let work = || loop {
            if failed.load(Ordering::SeqCst) {
                break;
            }
            let index = next.fetch_add(1, Ordering::SeqCst);
            if index >= total {
                break;
            }

            let result = transcode_input(ctx, inputs[index], index, total);
            if result.is_err() {
                failed.store(true, Ordering::SeqCst);
            }
            slots.lock()[index] = Some(result);

            let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
            ctx.report_progress(
                "Transcode",
                (finished * 100 / total) as u32,
                &format!("{}/{} tracks", finished, total),
            );
        };

        if workers == 1 {
            work();
        } else {
            std::thread::scope(|scope| {
                for _ in 0..workers {
                    scope.spawn(&work);
                }
            });
        }

        let mut filename_map = FilenameMap::new();
        let mut tracks = Vec::with_capacity(total);
        for slot in slots.into_inner().into_iter().flatten() {
            let track = slot?;
            filename_map.insert(track.input.clone(), track.output.clone());
            tracks.push(track);
        }

        state.transcode = Some(TranscodeOutput {
            filename_map,
            tracks,
        });

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, ctx: &Context, state: &BatchState) -> StepResult<()> {
        let output = state
            .transcode
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Transcode results not recorded"))?;

        if let Some(missing) = ctx
            .inputs
            .iter()
            .find(|input| output.filename_map.get(input).is_none())
        {
            return Err(StepError::invalid_output(format!(
                "No output recorded for {}",
                missing.display()
            )));
        }

        for (_, padded) in output.filename_map.iter() {
            if !padded.exists() {
                return Err(StepError::invalid_output(format!(
                    "Output file missing: {}",
                    padded.display()
                )));
            }
        }

        Ok(())
    }
}

fn transcode_input(
    ctx: &Context,
    input: &NamedInput,
    index: usize,
    total: usize,
) -> StepResult<TranscodedTrack> {
    ctx.logger
        .info(&format!("[{}/{}] {}", index + 1, total, input.path.display()));

    let stream = ctx
        .inspector
        .inspect(&input.path)
        .map_err(|source| StepError::StreamInspection {
            path: input.path.clone(),
            source,
        })?;
    tracing::debug!("Probed {}: {:?}", input.path.display(), stream);

    let track = TrackFile::new(input.path.clone(), input.name.clone(), stream);
    let transcoder = TrackTranscoder::new(
        ctx.engine.as_ref(),
        &ctx.logger,
        &ctx.settings,
        &ctx.scratch_root,
        &ctx.output_dir,
    );

    transcoder
        .transcode(&track)
        .map_err(|source| StepError::Transcode {
            path: input.path.clone(),
            source,
        })
}
