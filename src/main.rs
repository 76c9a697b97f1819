// Fieldservice - congregation field-service reports client
// Copyright (c) 2025 Fieldservice Contributors
// Licensed under the MIT License

use clap::Parser;
use fieldservice::cli::{Cli, Commands};
use fieldservice::config::{load_config, LoggingConfig};
use fieldservice::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the config when it loads; commands report config errors themselves
    let (config_level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (Some(config.application.log_level), config.logging),
        Err(_) => (None, LoggingConfig::default()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "warn".to_string());

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "fieldservice starting");

    // Cancel signal for long-running commands
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received SIGINT (Ctrl+C), cancelling");
                eprintln!("\n⚠️  Cancelling...");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Login(args) => args.execute(&cli.config).await,
        Commands::Logout(args) => args.execute(&cli.config).await,
        Commands::Home(args) => args.execute(&cli.config).await,
        Commands::People(args) => args.execute(&cli.config).await,
        Commands::Teams(args) => args.execute(&cli.config).await,
        Commands::Reports(args) => args.execute(&cli.config).await,
        Commands::LogActions(args) => args.execute(&cli.config).await,
        Commands::Congregations(args) => args.execute(&cli.config).await,
        Commands::ExportZip(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
