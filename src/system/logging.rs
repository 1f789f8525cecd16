//! Logging system initialization
//!
//! Sets up `tracing` according to the `[logging]` section of the configuration.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;
use crate::errors::{FlatlinkerError, Result};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget<'a> {
    Console,
    File(&'a str),
    Rolling(&'a str),
}

fn log_target(config: &LoggingConfig) -> LogTarget<'_> {
    match config.file.as_deref() {
        Some(file) if !file.is_empty() && config.enable_rotation => LogTarget::Rolling(file),
        Some(file) if !file.is_empty() => LogTarget::File(file),
        _ => LogTarget::Console,
    }
}

/// Initialize logging system based on configuration
///
/// The returned guard must be kept alive for the whole program, otherwise
/// buffered lines are lost.
///
/// Call once, after the configuration has been loaded.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let target = log_target(config);

    let writer: Box<dyn std::io::Write + Send + Sync> = match target {
        LogTarget::Rolling(log_file) => {
            let path = Path::new(log_file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("flatlinker.log");
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups as usize)
                .build(dir)
                .map_err(|e| {
                    FlatlinkerError::config_fault(format!(
                        "Failed to create rolling log appender: {}",
                        e
                    ))
                })?;
            Box::new(appender)
        }
        LogTarget::File(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .map_err(|e| {
                    FlatlinkerError::config_fault(format!(
                        "Failed to open log file {}: {}",
                        log_file, e
                    ))
                })?;
            Box::new(file)
        }
        LogTarget::Console => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::new(config.level.clone());

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(target == LogTarget::Console);

    if config.format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }

    Ok(guard)
}
