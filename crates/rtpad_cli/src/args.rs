//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use rtpad_core::config::Settings;
use rtpad_core::logging::LogLevel;

/// Align (pad) and transcode raw-tracks files.
#[derive(Parser, Debug)]
#[command(name = "transcode-and-pad", version)]
#[command(about = "Align (pad) and transcode raw-tracks files", long_about = None)]
pub struct Args {
    /// Files to process
    #[arg(required_unless_present = "init_config")]
    pub inputs: Vec<PathBuf>,

    /// Settings file to load (TOML)
    #[arg(short, long, env = "RTPAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write a default settings file to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,

    /// Scratch directory for padding/content segments
    #[arg(long, alias = "tmp_dir")]
    pub tmp_dir: Option<PathBuf>,

    /// Output directory
    #[arg(long, alias = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// Write the batch log to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Arguments prepended to all ffmpeg commands
    #[arg(long, alias = "ffmpeg_global_args", allow_hyphen_values = true)]
    pub ffmpeg_global_args: Option<String>,

    /// ffmpeg executable
    #[arg(long)]
    pub ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long)]
    pub ffprobe: Option<String>,

    /// Output video framerate (default 30)
    #[arg(long, alias = "video_framerate")]
    pub video_framerate: Option<String>,

    /// Output video target bitrate (default 5000k)
    #[arg(long, alias = "video_bitrate")]
    pub video_bitrate: Option<String>,

    /// Force the shortest side of the output to this many pixels (eg 720);
    /// 0 keeps the first frame's resolution
    #[arg(long, alias = "video_min_resolution_dimension")]
    pub video_min_resolution_dimension: Option<u32>,

    /// Allow filenames that do not match the raw-tracks filename format
    #[arg(long)]
    pub allow_any_filename_format: bool,

    /// Output a video+audio file for each matching cam-video and cam-audio pair
    #[arg(long)]
    pub combine_matching_video_and_audio: bool,

    /// Number of tracks to transcode at the same time
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Apply command-line values on top of loaded settings.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(dir) = &self.tmp_dir {
            settings.paths.scratch_dir = dir.to_string_lossy().to_string();
        }
        if let Some(dir) = &self.output_dir {
            settings.paths.output_dir = dir.to_string_lossy().to_string();
        }
        if let Some(dir) = &self.log_dir {
            settings.paths.logs_dir = dir.to_string_lossy().to_string();
        }
        if let Some(global_args) = &self.ffmpeg_global_args {
            settings.engine.global_args = global_args.clone();
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            settings.engine.ffmpeg_path = ffmpeg.clone();
        }
        if let Some(ffprobe) = &self.ffprobe {
            settings.engine.ffprobe_path = ffprobe.clone();
        }
        if let Some(framerate) = &self.video_framerate {
            settings.video.framerate = framerate.clone();
        }
        if let Some(bitrate) = &self.video_bitrate {
            settings.video.bitrate = bitrate.clone();
        }
        if let Some(dimension) = self.video_min_resolution_dimension {
            settings.video.min_resolution_dimension = dimension;
        }
        if self.allow_any_filename_format {
            settings.batch.allow_any_filename_format = true;
        }
        if self.combine_matching_video_and_audio {
            settings.batch.combine_matching_video_and_audio = true;
        }
        if let Some(jobs) = self.jobs {
            settings.batch.max_parallel = jobs.max(1);
        }
        if self.verbose {
            settings.logging.level = LogLevel::Debug;
            settings.logging.compact = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("transcode-and-pad").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn flags_override_settings() {
        let args = parse(&[
            "--output-dir",
            "/out",
            "--video-min-resolution-dimension",
            "720",
            "--combine-matching-video-and-audio",
            "--jobs",
            "4",
            "a.webm",
            "b.webm",
        ]);
        let mut settings = Settings::default();
        args.apply_to(&mut settings);

        assert_eq!(settings.paths.output_dir, "/out");
        assert_eq!(settings.video.min_resolution_dimension, 720);
        assert!(settings.batch.combine_matching_video_and_audio);
        assert!(!settings.batch.allow_any_filename_format);
        assert_eq!(settings.batch.max_parallel, 4);
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn absent_flags_keep_loaded_values() {
        let args = parse(&["a.webm"]);
        let mut settings = Settings::default();
        settings.video.bitrate = "2500k".to_string();
        settings.batch.combine_matching_video_and_audio = true;
        args.apply_to(&mut settings);

        assert_eq!(settings.video.bitrate, "2500k");
        assert!(settings.batch.combine_matching_video_and_audio);
        assert_eq!(settings.video.framerate, "30");
    }

    #[test]
    fn global_args_accept_leading_hyphen() {
        let args = parse(&["--ffmpeg-global-args", "-hide_banner -nostats", "a.webm"]);
        let mut settings = Settings::default();
        args.apply_to(&mut settings);

        assert_eq!(
            settings.engine.global_args_tokens(),
            vec!["-hide_banner", "-nostats"]
        );
    }

    #[test]
    fn underscore_spellings_are_accepted() {
        let args = parse(&["--tmp_dir", "/scratch", "--video_bitrate", "1M", "a.webm"]);
        assert_eq!(args.tmp_dir, Some(PathBuf::from("/scratch")));
        assert_eq!(args.video_bitrate.as_deref(), Some("1M"));
    }

    #[test]
    fn inputs_required_without_init_config() {
        assert!(Args::try_parse_from(["transcode-and-pad"]).is_err());
        let args = parse(&["--init-config", "rtpad.toml"]);
        assert!(args.inputs.is_empty());
    }

    #[test]
    fn verbose_enables_debug_output() {
        let args = parse(&["-v", "a.webm"]);
        let mut settings = Settings::default();
        args.apply_to(&mut settings);

        assert_eq!(settings.logging.level, LogLevel::Debug);
        assert!(!settings.logging.compact);
    }
}
