//! Domain identifier types with validation
//!
//! Newtype wrappers for server-assigned identifiers. Numeric records
//! (congregations, people, teams, publisher reports) use integer ids; ZIP jobs
//! use an opaque string id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw server id
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw id
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                trimmed
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| format!(concat!("Invalid ", $label, ": {}"), s))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Congregation identifier
    CongregationId,
    "congregation ID"
);
numeric_id!(
    /// Person (publisher) identifier
    PersonId,
    "person ID"
);
numeric_id!(
    /// Team identifier
    TeamId,
    "team ID"
);
numeric_id!(
    /// Publisher report identifier
    PublisherReportId,
    "publisher report ID"
);

/// Server-assigned ZIP job identifier
///
/// # Examples
///
/// ```
/// use fieldservice::domain::ids::JobId;
///
/// let job_id = JobId::new("abc123").unwrap();
/// assert_eq!(job_id.as_str(), "abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Creates a new JobId, rejecting blank ids
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Job ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the job ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
