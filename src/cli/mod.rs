//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for fieldservice using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// fieldservice - congregation field-service reports from the command line
#[derive(Parser, Debug)]
#[command(name = "fieldservice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "fieldservice.toml", env = "FIELDSERVICE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FIELDSERVICE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login(commands::login::LoginArgs),

    /// Remove the stored session token
    Logout(commands::logout::LogoutArgs),

    /// Show the congregation dashboard for a month
    Home(commands::home::HomeArgs),

    /// Manage people
    People(commands::people::PeopleArgs),

    /// Manage teams
    Teams(commands::teams::TeamsArgs),

    /// Manage monthly publisher reports
    Reports(commands::reports::ReportsArgs),

    /// Browse the audit log
    LogActions(commands::log_actions::LogActionsArgs),

    /// List or register congregations
    Congregations(commands::congregations::CongregationsArgs),

    /// Generate and save the publisher records ZIP for a service year
    ExportZip(commands::export_zip::ExportZipArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
