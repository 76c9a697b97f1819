//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use crate::domain::errors::AppError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`AppConfig`]
/// 4. Applies environment variable overrides (`FIELDSERVICE_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`AppError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| AppError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| AppError::Configuration(format!("Configuration validation failed: {e}")))?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Every missing variable is reported in a
/// single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AppError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(AppError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        AppError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}

/// Applies environment variable overrides using the `FIELDSERVICE_*` prefix
///
/// Variables follow the pattern `FIELDSERVICE_<SECTION>_<KEY>`, for example
/// `FIELDSERVICE_API_BASE_URL` or `FIELDSERVICE_EXPORT_TARGET`.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(val) = std::env::var("FIELDSERVICE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("FIELDSERVICE_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_override("FIELDSERVICE_API_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_API_CONNECT_TIMEOUT_SECONDS") {
        config.api.connect_timeout_seconds =
            parse_override("FIELDSERVICE_API_CONNECT_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_API_TLS_VERIFY") {
        config.api.tls_verify = parse_override("FIELDSERVICE_API_TLS_VERIFY", &val)?;
    }

    if let Ok(val) = std::env::var("FIELDSERVICE_SESSION_TOKEN_PATH") {
        config.session.token_path = val;
    }

    if let Ok(val) = std::env::var("FIELDSERVICE_EXPORT_TARGET") {
        config.export.target = val.parse().map_err(AppError::Configuration)?;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_EXPORT_POLL_INTERVAL_MS") {
        config.export.poll_interval_ms =
            parse_override("FIELDSERVICE_EXPORT_POLL_INTERVAL_MS", &val)?;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_EXPORT_MAX_POLL_ATTEMPTS") {
        config.export.max_poll_attempts =
            parse_override("FIELDSERVICE_EXPORT_MAX_POLL_ATTEMPTS", &val)?;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_EXPORT_DOWNLOAD_DIR") {
        config.export.download_dir = val;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_EXPORT_CACHE_DIR") {
        config.export.cache_dir = Some(val);
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_EXPORT_SHARE_COMMAND") {
        config.export.share_command = Some(val);
    }

    if let Ok(val) = std::env::var("FIELDSERVICE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("FIELDSERVICE_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("FIELDSERVICE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
