//! Init command implementation
//!
//! Writes a starter `fieldservice.toml`.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "fieldservice.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, content) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set api.base_url in {}", self.output);
                println!("  2. Validate it: fieldservice validate-config");
                println!("  3. Sign in: fieldservice login --congregation <number> --email <email>");
                println!("  4. Export: fieldservice export-zip --congregation <id>");
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# fieldservice configuration

[application]
log_level = "info"

[api]
base_url = "http://localhost:3000"

[export]
target = "download"
download_dir = "."
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# fieldservice configuration
#
# Any value may reference an environment variable as ${NAME}.
# Any key may be overridden with FIELDSERVICE_<SECTION>_<KEY>,
# e.g. FIELDSERVICE_API_BASE_URL.

[application]
# trace, debug, info, warn, error
log_level = "info"

[api]
# Base URL of the field-service API
base_url = "http://localhost:3000"
# Whole-request timeout in seconds (1-600)
timeout_seconds = 60
connect_timeout_seconds = 10
# Only disable against a local development server
tls_verify = true

[session]
# Where the bearer token is kept between runs
token_path = ".fieldservice/session"

[export]
# "download": write into download_dir, renaming on collision
# "share": write into <cache_dir>/downloads and run share_command on it
target = "download"
# Delay between progress polls (100-60000 ms)
poll_interval_ms = 2000
# Polls before giving up (1-10000); 300 x 2 s is about ten minutes
max_poll_attempts = 300
download_dir = "."
# cache_dir = "/tmp/fieldservice"
# share_command = "xdg-open"

[logging]
# JSON lines to <local_path>/fieldservice.log
local_enabled = false
local_path = "logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_are_valid() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: AppConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("fieldservice.toml");
        std::fs::write(&output, "keep").unwrap();

        let args = InitArgs {
            output: output.display().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), EXIT_OK);
        assert!(std::fs::read_to_string(&output).unwrap().contains("[api]"));
    }
}
