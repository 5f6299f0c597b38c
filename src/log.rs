use anyhow::Result;
use std::fs::File;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{filter::Targets, fmt, prelude::*, registry};

use crate::cli::Cli;
use crate::config::default::DEFAULT_LOG_FILE_NAME;
use crate::time::{LocalDateTime, LocalTimeOnly};

/// Crate target used to filter log records
const LOG_TARGET: &str = "subscout";

/// Initialize the logger based on command-line arguments.
pub fn init_logger(cli_args: &Cli) -> Result<()> {
    let indicatif_layer = IndicatifLayer::new();

    // Console output goes through the indicatif writer so it does not tear the progress bar
    let console_fmt = fmt::layer()
        .with_target(false)
        .with_timer(LocalTimeOnly)
        .with_writer(indicatif_layer.get_stderr_writer());

    let console_filter = if cli_args.quiet {
        Targets::new()
            .with_default(LevelFilter::OFF)
            .with_target(LOG_TARGET, LevelFilter::ERROR)
    } else {
        Targets::new()
            .with_default(LevelFilter::OFF)
            .with_target(LOG_TARGET, cli_args.log_level.to_level_filter())
    };

    if !cli_args.log_file {
        registry()
            .with(indicatif_layer)
            .with(console_fmt.with_filter(console_filter))
            .try_init()?;
        return Ok(());
    }

    let log_file_path = match &cli_args.log_file_path {
        Some(path) => path.clone(),
        None => crate::config::get_user_file_path(DEFAULT_LOG_FILE_NAME)
            .ok_or_else(|| anyhow::anyhow!("Failed to locate the home directory for the log file"))?,
    };

    // Open log file in append mode
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let file_fmt = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalDateTime)
        .with_writer(Mutex::new(file));

    let file_filter = Targets::new()
        .with_default(LevelFilter::OFF)
        .with_target(LOG_TARGET, cli_args.log_level.to_level_filter());

    registry()
        .with(indicatif_layer)
        .with(console_fmt.with_filter(console_filter))
        .with(file_fmt.with_filter(file_filter))
        .try_init()?;

    Ok(())
}
