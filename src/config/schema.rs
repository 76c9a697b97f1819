//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where a downloaded archive ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaveTarget {
    /// Write straight into the download directory, like a browser download
    #[default]
    Download,
    /// Write into the cache downloads directory and hand the file to a share command
    Share,
}

impl std::str::FromStr for SaveTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "download" => Ok(SaveTarget::Download),
            "share" => Ok(SaveTarget::Share),
            other => Err(format!(
                "Invalid export.target '{other}'. Must be one of: download, share"
            )),
        }
    }
}

impl std::fmt::Display for SaveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveTarget::Download => f.write_str("download"),
            SaveTarget::Share => f.write_str("share"),
        }
    }
}

/// Main fieldservice configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// REST API connection
    pub api: ApiConfig,

    /// Session token storage
    #[serde(default)]
    pub session: SessionConfig,

    /// ZIP export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.session.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// REST API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the field-service API, without a trailing slash
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// TLS certificate verification
    ///
    /// Only disable against a local development server.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("api.base_url is not a valid URL: {}", self.base_url));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "api.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err("api.connect_timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Session token storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the bearer token between invocations
    #[serde(default = "default_token_path")]
    pub token_path: String,
}

impl SessionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.token_path.trim().is_empty() {
            return Err("session.token_path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

/// ZIP export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// How the finished archive is persisted
    #[serde(default)]
    pub target: SaveTarget,

    /// Delay between progress polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Polls before the export gives up
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Destination for the `download` target
    #[serde(default = "default_download_dir")]
    pub download_dir: String,

    /// Cache root for the `share` target; the archive lands in `<cache_dir>/downloads`
    #[serde(default)]
    pub cache_dir: Option<String>,

    /// Opener used by the `share` target (e.g. "xdg-open"); the file path is appended
    #[serde(default)]
    pub share_command: Option<String>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if !(100..=60_000).contains(&self.poll_interval_ms) {
            return Err(format!(
                "export.poll_interval_ms must be between 100 and 60000, got {}",
                self.poll_interval_ms
            ));
        }

        if self.max_poll_attempts == 0 || self.max_poll_attempts > 10_000 {
            return Err(format!(
                "export.max_poll_attempts must be between 1 and 10000, got {}",
                self.max_poll_attempts
            ));
        }

        if self.target == SaveTarget::Download && self.download_dir.trim().is_empty() {
            return Err("export.download_dir cannot be empty when target is 'download'".to_string());
        }

        if let Some(ref command) = self.share_command {
            if command.trim().is_empty() {
                return Err("export.share_command cannot be blank".to_string());
            }
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Cache root, falling back to the system temp directory
    pub fn cache_root(&self) -> PathBuf {
        match self.cache_dir {
            Some(ref dir) => PathBuf::from(dir),
            None => std::env::temp_dir().join("fieldservice"),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            target: SaveTarget::default(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            download_dir: default_download_dir(),
            cache_dir: None,
            share_command: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_token_path() -> String {
    ".fieldservice/session".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_max_poll_attempts() -> u32 {
    300
}

fn default_download_dir() -> String {
    ".".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_export_defaults_match_polling_budget() {
        let export = ExportConfig::default();
        assert_eq!(export.poll_interval(), Duration::from_millis(2000));
        assert_eq!(export.max_poll_attempts, 300);
        assert_eq!(export.target, SaveTarget::Download);
    }

    #[test]
    fn test_invalid_base_url_scheme() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("must start with http"));
    }

    #[test]
    fn test_invalid_poll_interval() {
        let mut config = AppConfig::default();
        config.export.poll_interval_ms = 10;
        assert!(config.validate().unwrap_err().contains("poll_interval_ms"));
    }

    #[test]
    fn test_invalid_attempts() {
        let mut config = AppConfig::default();
        config.export.max_poll_attempts = 0;
        assert!(config.validate().unwrap_err().contains("max_poll_attempts"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = AppConfig::default();
        config.logging.local_rotation = "size".to_string();
        assert!(config.validate().unwrap_err().contains("local_rotation"));
    }

    #[test]
    fn test_save_target_parse() {
        assert_eq!("Share".parse::<SaveTarget>().unwrap(), SaveTarget::Share);
        assert!("browser".parse::<SaveTarget>().is_err());
    }

    #[test]
    fn test_normalized_base_url() {
        let api = ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(api.normalized_base_url(), "https://api.example.com");
    }

    #[test]
    fn test_cache_root_override() {
        let export = ExportConfig {
            cache_dir: Some("/tmp/fs-cache".to_string()),
            ..Default::default()
        };
        assert_eq!(export.cache_root(), PathBuf::from("/tmp/fs-cache"));
    }
}
