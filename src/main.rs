//! `yuvdelta`: reads raw RGB24 frames from stdin, runs the transcoding pipeline,
//! and writes `encoded.yuv`, `decoded.yuv` and `decoded.rgb24` to the output
//! directory. Size statistics are logged to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use log::{Level, LevelFilter};

use yuvdelta::bridge;
use yuvdelta::{CompressionProfile, TranscodeConfig, YuvDeltaError, VERSION};

const USAGE: &str = "\
usage: yuvdelta [options] < frames.rgb24

options:
  --width N           frame width in pixels (default 1080, must be even)
  --height N          frame height in pixels (default 1920, must be even)
  --config PATH       JSON config file; flags override its values
  --out-dir DIR       directory for output artifacts (default .)
  --profile NAME      fast | balanced | high_compression
  --no-rle-stats      skip the RLE size statistic
  --report-json       print the size report as JSON on stdout
  --verbose           debug-level logging
  --help              show this message";

//==================================================================================
// 1. Argument Parsing
//==================================================================================

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    width: Option<usize>,
    height: Option<usize>,
    config_path: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    profile: Option<CompressionProfile>,
    no_rle_stats: bool,
    report_json: bool,
    verbose: bool,
}

fn usage_error(msg: String) -> YuvDeltaError {
    YuvDeltaError::Config(msg)
}

fn parse_usize(flag: &str, value: &str) -> Result<usize, YuvDeltaError> {
    value
        .parse()
        .map_err(|_| usage_error(format!("--{} expects a non-negative integer, got '{}'", flag, value)))
}

/// Parses flags in `--name value`, `--name=value` or single-dash `-name value` form.
/// Returns `Ok(None)` when help was requested.
fn parse_args<I>(args: I) -> Result<Option<CliArgs>, YuvDeltaError>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        let stripped = arg.trim_start_matches('-');
        if stripped.len() == arg.len() {
            return Err(usage_error(format!("unexpected argument '{}'", arg)));
        }
        let (name, inline) = match stripped.split_once('=') {
            Some((n, v)) => (n, Some(v.to_string())),
            None => (stripped, None),
        };

        let mut value = || -> Result<String, YuvDeltaError> {
            match &inline {
                Some(v) => Ok(v.clone()),
                None => iter
                    .next()
                    .ok_or_else(|| usage_error(format!("--{} expects a value", name))),
            }
        };

        match name {
            "width" => out.width = Some(parse_usize(name, &value()?)?),
            "height" => out.height = Some(parse_usize(name, &value()?)?),
            "config" => out.config_path = Some(PathBuf::from(value()?)),
            "out-dir" => out.out_dir = Some(PathBuf::from(value()?)),
            "profile" => out.profile = Some(CompressionProfile::from_name(&value()?)?),
            "no-rle-stats" => out.no_rle_stats = true,
            "report-json" => out.report_json = true,
            "verbose" | "v" => out.verbose = true,
            "help" | "h" => return Ok(None),
            other => return Err(usage_error(format!("unknown flag '--{}'", other))),
        }
    }
    Ok(Some(out))
}

/// Loads the config file if one was given, then applies flag overrides.
fn build_config(args: &CliArgs) -> Result<TranscodeConfig, YuvDeltaError> {
    let mut config = match &args.config_path {
        Some(path) => TranscodeConfig::from_json_file(path)?,
        None => TranscodeConfig::default(),
    };
    if let Some(width) = args.width {
        config.resolution.width = width;
    }
    if let Some(height) = args.height {
        config.resolution.height = height;
    }
    if let Some(profile) = args.profile {
        config.profile = profile;
    }
    if args.no_rle_stats {
        config.collect_rle_stats = false;
    }
    config.validate()?;
    Ok(config)
}

//==================================================================================
// 2. Logging
//==================================================================================

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();

    builder.is_test(false);
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    // Custom formatter: just print the level and message
    builder.format(|buf, record| {
        let level = match record.level() {
            Level::Error => "ERROR".red(),
            Level::Warn => "WARN".yellow(),
            Level::Info => "INFO".green(),
            Level::Debug => "DEBUG".blue(),
            Level::Trace => "TRACE".dimmed(),
        };
        writeln!(buf, "[{}] {}", level, record.args())
    });

    let _ = builder.try_init();
}

//==================================================================================
// 3. Entry Point
//==================================================================================

fn run(args: CliArgs) -> Result<(), YuvDeltaError> {
    let config = Arc::new(build_config(&args)?);
    log::info!(
        "yuvdelta {} | {} | profile {:?}",
        VERSION,
        config.resolution,
        config.profile
    );

    let stdin = io::stdin();
    let (output, summary) = bridge::transcode_reader(stdin.lock(), Arc::clone(&config))?;
    if summary.discarded_tail > 0 {
        log::debug!("Input ended mid-frame; {} bytes ignored", summary.discarded_tail);
    }

    let out_dir = args.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    bridge::write_artifacts(&out_dir, &config.artifacts, &output)?;

    if args.report_json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &output.report)?;
        writeln!(stdout)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    init_logger(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_both_flag_forms() {
        let parsed = parse_args(args(&["--width", "640", "-height=480", "--report-json"]))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.width, Some(640));
        assert_eq!(parsed.height, Some(480));
        assert!(parsed.report_json);
        assert!(!parsed.verbose);
    }

    #[test]
    fn test_parse_help_and_errors() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), None);
        assert!(parse_args(args(&["--width"])).is_err());
        assert!(parse_args(args(&["--width", "wide"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
        assert!(parse_args(args(&["stray"])).is_err());
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let parsed = parse_args(args(&["--width", "4", "--height", "2", "--profile", "fast", "--no-rle-stats"]))
            .unwrap()
            .unwrap();
        let config = build_config(&parsed).unwrap();
        assert_eq!(config.resolution.width, 4);
        assert_eq!(config.resolution.height, 2);
        assert_eq!(config.profile, CompressionProfile::Fast);
        assert!(!config.collect_rle_stats);
    }

    #[test]
    fn test_build_config_rejects_odd_width() {
        let parsed = parse_args(args(&["--width", "5"])).unwrap().unwrap();
        assert!(build_config(&parsed).is_err());
    }
}
