// src/logging.rs

use crate::errors::{ChatError, ChatResult};
use crate::models::ApiCallLog;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use log::info;
use std::path::PathBuf;

/// Starts file logging. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr.
pub fn init_logging(level: &str) -> ChatResult<LoggerHandle> {
    let log_dir = log_directory()?;

    let handle = Logger::try_with_str(level)?
        .log_to_file(FileSpec::default().directory(&log_dir).basename("gemchat"))
        .rotate(
            Criterion::Size(5 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(3),
        )
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!("logging to {}", log_dir.display());
    Ok(handle)
}

fn log_directory() -> ChatResult<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine local data directory"))?;
    Ok(base.join("gemchat").join("logs"))
}

/// Logs an API call under the `api` target.
pub fn log_api_call(log: &ApiCallLog) {
    info!(
        target: "api",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
