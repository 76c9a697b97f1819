//! Configuration management for fieldservice.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `FIELDSERVICE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - REST API base URL and timeouts
//! - [`SessionConfig`] - Where the bearer token is kept
//! - [`ExportConfig`] - ZIP polling budget and save target
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "${FIELDSERVICE_API_URL}"
//!
//! [export]
//! target = "share"
//! poll_interval_ms = 2000
//! max_poll_attempts = 300
//! share_command = "xdg-open"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApiConfig, AppConfig, ApplicationConfig, ExportConfig, LoggingConfig, SaveTarget,
    SessionConfig,
};
pub use secret::{bearer, secret_string, SecretString, SecretValue};
