//! CLI command implementations
//!
//! Every command returns a process exit code:
//! - 0 success
//! - 2 configuration or input error
//! - 3 no usable session
//! - 4 API unreachable or request rejected
//! - 5 fatal (export failed, file could not be saved)
//! - 130 cancelled by Ctrl+C

pub mod congregations;
pub mod export_zip;
pub mod home;
pub mod init;
pub mod log_actions;
pub mod login;
pub mod logout;
pub mod people;
pub mod reports;
pub mod teams;
pub mod validate;

use crate::adapters::api::{ApiClient, Session};
use crate::config::{load_config, AppConfig};
use crate::domain::{ApiError, AppError, ExportError};

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_UNAUTHENTICATED: i32 = 3;
pub const EXIT_API: i32 = 4;
pub const EXIT_FATAL: i32 = 5;
pub const EXIT_CANCELLED: i32 = 130;

/// Loaded configuration plus a client bound to the stored session
pub(crate) struct CommandContext {
    pub config: AppConfig,
    pub client: ApiClient,
}

impl CommandContext {
    /// Loads the config and builds the client, or returns the exit code to use
    pub(crate) fn load(config_path: &str) -> Result<Self, i32> {
        let config = load_config(config_path).map_err(|e| fail("Failed to load configuration", &e))?;
        let session = Session::from_file(&config.session.token_path);
        let client = ApiClient::new(&config.api, session)
            .map_err(|e| fail("Failed to create API client", &e))?;
        Ok(Self { config, client })
    }
}

/// Exit code for an error
pub fn exit_code_for(error: &AppError) -> i32 {
    match error {
        AppError::Configuration(_) | AppError::Validation(_) => EXIT_CONFIG,
        AppError::Api(ApiError::Unauthenticated(_)) => EXIT_UNAUTHENTICATED,
        AppError::Api(_) => EXIT_API,
        AppError::Export(ExportError::Cancelled) => EXIT_CANCELLED,
        AppError::Export(_)
        | AppError::Session(_)
        | AppError::NotPermitted(_)
        | AppError::Serialization(_)
        | AppError::Io(_) => EXIT_FATAL,
    }
}

/// Logs and prints the error, returning its exit code
pub(crate) fn fail(context: &str, error: &AppError) -> i32 {
    crate::log_error_with_context!(error, context);
    eprintln!("❌ {context}: {error}");
    if error.is_unauthenticated() {
        eprintln!("   Run `fieldservice login` to start a session");
    }
    exit_code_for(error)
}

/// Reads a JSON record from a file for create and update commands
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> crate::domain::Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Turns a command body's result into an exit code
pub(crate) fn finish(context: &str, result: crate::domain::Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_OK,
        Err(e) => fail(context, &e),
    }
}
