// Fieldservice - congregation field-service reports client
// Copyright (c) 2025 Fieldservice Contributors
// Licensed under the MIT License

//! # Fieldservice
//!
//! Typed client for a congregation field-service REST API: people, teams,
//! monthly publisher reports, the congregation dashboard, the audit log, and
//! the asynchronous ZIP export of a service year's publisher records.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The ZIP export flow (start, poll, download, save)
//! - [`adapters`] - REST API client, session, artifact savers
//! - [`domain`] - Records, identifiers, reporting periods, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fieldservice::adapters::api::{ApiClient, ReportsApi, Session};
//! use fieldservice::adapters::artifact::saver_for;
//! use fieldservice::config::load_config;
//! use fieldservice::core::export::{PollPolicy, ZipExportRequest, ZipExporter};
//! use fieldservice::domain::CongregationId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("fieldservice.toml")?;
//!     let session = Session::from_file(&config.session.token_path);
//!     let reports = ReportsApi::new(ApiClient::new(&config.api, session)?);
//!     let saver = saver_for(&config.export);
//!
//!     let exporter = ZipExporter::new(&reports, saver.as_ref(), PollPolicy::from_config(&config.export));
//!     let mut on_progress = |p: &fieldservice::domain::ZipProgress| println!("{}%", p.percent);
//!     let outcome = exporter
//!         .download_congregation_publishers_service_year_zip(
//!             ZipExportRequest {
//!                 congregation_id: CongregationId::new(3),
//!                 service_year: 2025,
//!             },
//!             Some(&mut on_progress),
//!         )
//!         .await?;
//!
//!     println!("Saved {}", outcome.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error is
//! [`domain::AppError`]. API failures carry the server's message:
//!
//! ```rust
//! use fieldservice::domain::{ApiError, AppError};
//!
//! let err: AppError = ApiError::Http { status: 404, message: "Person not found".into() }.into();
//! assert_eq!(err.to_string(), "API error: Person not found");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
