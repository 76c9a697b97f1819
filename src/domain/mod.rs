//! Domain models and types for fieldservice.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CongregationId`], [`PersonId`], [`TeamId`], [`JobId`])
//! - **API records** ([`Person`], [`Team`], [`PublisherReport`], [`CongregationHomeReport`])
//! - **ZIP job types** ([`ZipJob`], [`ZipProgress`], [`ZipPayload`])
//! - **Reporting periods** ([`ServicePeriod`], [`service_year_for`], [`service_year_record`])
//! - **Error types** ([`AppError`], [`ApiError`], [`ExportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes so a team id cannot be passed where a person id
//! is expected:
//!
//! ```rust
//! use fieldservice::domain::{PersonId, TeamId};
//!
//! let person = PersonId::new(7);
//! let team = TeamId::new(7);
//! assert_eq!(person.get(), team.get());
//! // let wrong: PersonId = team;  // Compile error!
//! ```

pub mod auth;
pub mod congregation;
pub mod errors;
pub mod ids;
pub mod log_action;
pub mod period;
pub mod person;
pub mod publisher_report;
pub mod record;
pub mod report;
pub mod result;
pub mod team;
pub mod zip;

// Re-export commonly used types for convenience
pub use auth::{AuthResponse, AuthUser, LoginForm};
pub use congregation::Congregation;
pub use errors::{ApiError, AppError, ExportError, UnauthenticatedReason};
pub use ids::{CongregationId, JobId, PersonId, PublisherReportId, TeamId};
pub use log_action::{LogAction, LogActionsPage};
pub use period::{format_long_date, service_year_for, ServicePeriod};
pub use person::{Person, Sex};
pub use publisher_report::{PublisherReport, PublisherReportQuery, SortOrder};
pub use record::{average_hours, service_year_record, total_hours, RecordMonth, SERVICE_YEAR_MONTHS};
pub use report::CongregationHomeReport;
pub use result::Result;
pub use team::Team;
pub use zip::{ZipJob, ZipPayload, ZipProgress, ZipStatus};
