//! Domain error types
//!
//! This module defines the error hierarchy for fieldservice. All errors are
//! domain-specific and don't expose third-party HTTP client types.

use thiserror::Error;

/// Main fieldservice error type
///
/// This is the primary error type used throughout the application.
/// It wraps the API and export error families and provides context for
/// error handling at the CLI layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// REST API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// ZIP export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session storage errors
    #[error("Session error: {0}")]
    Session(String),

    /// The requested action is refused by the client
    #[error("Action not permitted: {0}")]
    NotPermitted(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Why a request could not be authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    /// No token is stored
    Missing,
    /// The stored token is past its `exp` claim
    Expired,
    /// The stored token could not be decoded
    Invalid,
}

impl std::fmt::Display for UnauthenticatedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Missing => "no active session, please sign in",
            Self::Expired => "session expired, please sign in again",
            Self::Invalid => "stored session is invalid, please sign in again",
        };
        f.write_str(text)
    }
}

/// REST API errors
///
/// Errors that occur when talking to the field-service API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the server
    #[error("Failed to connect to API server: {0}")]
    Connection(String),

    /// Non-2xx response; `message` is the server's `message` field when present
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The session has no usable token
    #[error("Unauthenticated: {0}")]
    Unauthenticated(UnauthenticatedReason),

    /// The response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// A body was expected but the server answered 204
    #[error("Empty response from {0}")]
    EmptyResponse(String),
}

impl ApiError {
    /// HTTP status of the failed request, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// ZIP export errors
///
/// Terminal outcomes of the report export flow other than success.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The server reported the job as failed
    #[error("{0}")]
    JobFailed(String),

    /// The job did not finish within the polling budget
    #[error("ZIP generation timed out after {attempts} polling attempts")]
    Timeout { attempts: u32 },

    /// The cancel signal was raised while polling
    #[error("ZIP export cancelled")]
    Cancelled,

    /// The archive did not materialize on disk
    #[error("Could not save the file: {0}")]
    SaveFailed(String),

    /// The share step failed after the file was saved
    #[error("Could not share the file: {0}")]
    ShareFailed(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl AppError {
    /// True when the failure means the user must sign in again
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AppError::Api(ApiError::Unauthenticated(_)))
    }
}
