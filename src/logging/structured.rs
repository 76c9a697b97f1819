//! Subscriber setup
//!
//! Stdout belongs to command output (tables, progress lines), so the console
//! layer writes compact records to stderr. With `logging.local_enabled` a
//! second layer appends JSON lines to `<local_path>/fieldservice.log.<date>`.

use crate::config::LoggingConfig;
use crate::domain::{AppError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_PREFIX: &str = "fieldservice.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive; dropping it flushes pending records
pub struct LoggingGuard {
    file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    pub fn has_file_writer(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Installs the global subscriber
///
/// `RUST_LOG` replaces the `fieldservice=<level>` filter when set.
///
/// # Errors
///
/// [`AppError::Configuration`] for an unknown level, a log directory that
/// cannot be created, or a subscriber that is already installed.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level_str)?;

    let console = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter(level))
        .boxed();

    let mut layers: Vec<BoxedLayer> = vec![console];
    let mut file_guard = None;

    if config.local_enabled {
        let (layer, guard) = file_layer(config, filter(level))?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| AppError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard { file_guard })
}

// One per layer; `EnvFilter` is not `Clone`
fn filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fieldservice={level}")))
}

fn file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        AppError::Configuration(format!(
            "Failed to create log directory {}: {}",
            config.local_path, e
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_PREFIX,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(false)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

// Validated by LoggingConfig; anything else means daily
fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn parse_log_level(level_str: &str) -> Result<Level> {
    level_str.trim().parse::<Level>().map_err(|_| {
        AppError::Configuration(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace" => Level::TRACE)]
    #[test_case("debug" => Level::DEBUG)]
    #[test_case("INFO" => Level::INFO)]
    #[test_case("Warn" => Level::WARN)]
    #[test_case("error" => Level::ERROR)]
    fn test_parse_log_level(input: &str) -> Level {
        parse_log_level(input).unwrap()
    }

    #[test]
    fn test_parse_log_level_rejects_unknown() {
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_rotation_names() {
        assert_eq!(rotation("hourly"), Rotation::HOURLY);
        assert_eq!(rotation("never"), Rotation::NEVER);
        assert_eq!(rotation("daily"), Rotation::DAILY);
    }
}
