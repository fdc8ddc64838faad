//! `transcode-and-pad` - align raw-tracks recordings onto their session
//! timeline.

mod args;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use rtpad_core::config::{ConfigManager, Settings};
use rtpad_core::engine::FfmpegEngine;
use rtpad_core::logging::{init_tracing, BatchLoggerBuilder, LogConfig};
use rtpad_core::orchestrator::{run_batch, BatchState, Context};
use rtpad_core::probe::FfprobeInspector;

use args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(path) = &args.init_config {
        let mut config = ConfigManager::new(path);
        config
            .load_or_create()
            .with_context(|| format!("writing config {}", path.display()))?;
        println!("Wrote {}", config.path().display());
        return Ok(());
    }

    let mut settings = match &args.config {
        Some(path) => {
            let mut config = ConfigManager::new(path);
            config
                .load()
                .with_context(|| format!("loading config {}", path.display()))?;
            config.into_settings()
        }
        None => Settings::default(),
    };
    args.apply_to(&mut settings);

    init_tracing(settings.logging.level);
    tracing::debug!("Effective settings: {:?}", settings);

    let batch_name = format!(
        "transcode-and-pad-{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    let mut builder = BatchLoggerBuilder::new(&batch_name)
        .config(LogConfig::from(&settings.logging))
        .line_callback(Box::new(|line| eprintln!("{}", line)));
    if !settings.paths.logs_dir.is_empty() {
        builder = builder.log_dir(&settings.paths.logs_dir);
    }
    let logger = builder.build().context("creating batch log")?;

    let engine = FfmpegEngine::from_settings(&settings.engine);
    let inspector = FfprobeInspector::new().with_ffprobe_path(&settings.engine.ffprobe_path);

    let ctx = Context::new(
        args.inputs,
        settings,
        batch_name,
        Arc::new(logger),
        Arc::new(engine),
        Arc::new(inspector),
    );

    let result = run_batch(&ctx);
    if let Some(path) = ctx.logger.log_path() {
        eprintln!("log: {}", path.display());
    }
    print_summary(&result?);
    Ok(())
}

fn print_summary(state: &BatchState) {
    if let Some(map) = state.filename_map() {
        for (input, output) in map.iter() {
            println!("{} -> {}", input.display(), output.display());
        }
    }
    if let Some(combine) = &state.combine {
        for path in &combine.combined {
            println!("combined: {}", path.display());
        }
        for anomaly in &combine.anomalies {
            println!("warning: {}", anomaly);
        }
    }
}
