//! Validate config command implementation

use super::{EXIT_CONFIG, EXIT_OK};
use crate::adapters::api::session::token_expiry;
use crate::adapters::api::{AuthState, Session};
use crate::config::{load_config, SaveTarget};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API: {}", config.api.normalized_base_url());
        println!("  Timeout: {}s", config.api.timeout_seconds);
        println!("  Session File: {}", config.session.token_path);
        println!("  Export Target: {}", config.export.target);
        match config.export.target {
            SaveTarget::Download => println!("  Download Dir: {}", config.export.download_dir),
            SaveTarget::Share => {
                println!("  Cache Dir: {}", config.export.cache_root().join("downloads").display());
                println!(
                    "  Share Command: {}",
                    config.export.share_command.as_deref().unwrap_or("(log only)")
                );
            }
        }
        println!(
            "  Polling: every {} ms, up to {} attempts",
            config.export.poll_interval_ms, config.export.max_poll_attempts
        );

        let session = Session::from_file(&config.session.token_path);
        match session.authorize().await {
            Ok(AuthState::Authenticated(token)) => {
                let expiry = token_expiry(token.expose_secret().as_ref())
                    .map(|at| format!(" (expires {})", at.format("%Y-%m-%d %H:%M UTC")))
                    .unwrap_or_default();
                println!("  Session: signed in{expiry}");
            }
            Ok(AuthState::Unauthenticated(reason)) => println!("  Session: {reason}"),
            Err(e) => println!("  Session: unreadable ({e})"),
        }
        println!();

        Ok(EXIT_OK)
    }
}
