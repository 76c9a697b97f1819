//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output on stderr
//! - optional JSON file output with rotation
//! - `RUST_LOG` filter overrides
//!
//! # Example
//!
//! ```no_run
//! use fieldservice::config::LoggingConfig;
//! use fieldservice::logging::init_logging;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("logger");
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log one ZIP progress snapshot
///
/// # Example
///
/// ```no_run
/// use fieldservice::domain::{JobId, ZipProgress};
/// use fieldservice::log_export_progress;
///
/// let snapshot = ZipProgress::pending(JobId::new("abc123").unwrap());
/// log_export_progress!(&snapshot, 1);
/// ```
#[macro_export]
macro_rules! log_export_progress {
    ($progress:expr, $attempt:expr) => {
        tracing::debug!(
            job_id = %$progress.job_id,
            attempt = $attempt,
            status = %$progress.status,
            percent = $progress.percent,
            completed = $progress.completed,
            total = $progress.total,
            "ZIP progress"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use fieldservice::domain::AppError;
/// use fieldservice::log_error_with_context;
///
/// let error = AppError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
