use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, info};

/// Initialize logger with fern
///
/// Records go to `log_file` when one is configured, otherwise to stdout;
/// `colored` applies to stdout only. HTTP-stack internals are capped at
/// warn so per-request noise never drowns the service's own records.
pub fn initialize(
    log_level: gate_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let sink = match log_file {
        Some(ref log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|e| ServerError::Logging {
                    message: format!("Failed to open log file {}: {}", log_path.display(), e),
                })?;

            // File output is never colored
            line_format(None).chain(file)
        }
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            line_format(Some(colors)).chain(std::io::stdout())
        }
        None => line_format(None).chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .level_for("hyper", LevelFilter::Warn)
        .level_for("tower_http", LevelFilter::Warn)
        .chain(sink)
        .apply()
        .map_err(|e| ServerError::Logging {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    Ok(())
}

/// One record per line: timestamp, level, message, source location
fn line_format(colors: Option<ColoredLevelConfig>) -> Dispatch {
    Dispatch::new().format(move |out, message, record| {
        let level = match colors {
            Some(ref c) => c.color(record.level()).to_string(),
            None => record.level().to_string(),
        };
        out.finish(format_args!(
            "[{date} - {level}] {message} [{file}:{line}]",
            date = humantime::format_rfc3339(SystemTime::now()),
            level = level,
            message = message,
            file = record.file().unwrap_or("unknown"),
            line = record.line().unwrap_or(0),
        ))
    })
}
