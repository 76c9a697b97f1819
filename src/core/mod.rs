//! Core business logic for fieldservice.
//!
//! # Modules
//!
//! - [`export`] - the ZIP export flow for a congregation's service year
//!
//! # Example
//!
//! ```rust,no_run
//! use fieldservice::adapters::api::{ApiClient, ReportsApi, Session};
//! use fieldservice::adapters::artifact::DownloadSaver;
//! use fieldservice::config::ApiConfig;
//! use fieldservice::core::export::{PollPolicy, ZipExportRequest, ZipExporter};
//! use fieldservice::domain::CongregationId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(&ApiConfig::default(), Session::from_file(".fieldservice/session"))?;
//! let reports = ReportsApi::new(client);
//! let saver = DownloadSaver::new("downloads");
//!
//! let exporter = ZipExporter::new(&reports, &saver, PollPolicy::default());
//! let request = ZipExportRequest {
//!     congregation_id: CongregationId::new(3),
//!     service_year: 2025,
//! };
//! let outcome = exporter
//!     .download_congregation_publishers_service_year_zip(request, None)
//!     .await?;
//!
//! println!("Saved {}", outcome.path.display());
//! # Ok(())
//! # }
//! ```

pub mod export;
