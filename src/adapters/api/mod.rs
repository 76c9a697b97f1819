//! Field-service REST API
//!
//! [`ApiClient`] owns the HTTP plumbing; one small service type per resource
//! wraps it. Services are cheap to build from a cloned client.
//!
//! ```rust,no_run
//! use fieldservice::adapters::api::{ApiClient, PeopleApi, Session};
//! use fieldservice::config::ApiConfig;
//! use fieldservice::domain::CongregationId;
//!
//! # async fn example() -> fieldservice::domain::Result<()> {
//! let client = ApiClient::new(&ApiConfig::default(), Session::from_file(".fieldservice/session"))?;
//! let people = PeopleApi::new(client.clone())
//!     .list_by_congregation(CongregationId::new(3))
//!     .await?;
//! println!("{} people", people.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod congregations;
pub mod log_actions;
pub mod people;
pub mod publisher_reports;
pub mod reports;
pub mod session;
pub mod teams;

pub use auth::AuthApi;
pub use client::{normalize_endpoint, with_query, ApiClient, RawResponse};
pub use congregations::CongregationsApi;
pub use log_actions::LogActionsApi;
pub use people::PeopleApi;
pub use publisher_reports::PublisherReportsApi;
pub use reports::{ReportsApi, ZipJobApi};
pub use session::{AuthState, FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use teams::TeamsApi;
