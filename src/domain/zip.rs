//! Server-side ZIP job types
//!
//! A ZIP job bundles every publisher record of a congregation for one service
//! year. The client only ever holds the job id and the latest progress
//! snapshot; both are discarded once the flow reaches a terminal state.

use super::ids::JobId;
use serde::{Deserialize, Serialize};

/// Response of the generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipJob {
    pub job_id: JobId,

    /// Congregation echo from the server; shape is not relied upon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congregation: Option<serde_json::Value>,

    #[serde(default)]
    pub progress_url: String,

    #[serde(default)]
    pub download_url: String,
}

/// Job status as reported by the progress endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZipStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ZipStatus {
    /// Completed and failed end the polling loop
    pub fn is_terminal(self) -> bool {
        matches!(self, ZipStatus::Completed | ZipStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZipStatus::Pending => "pending",
            ZipStatus::Processing => "processing",
            ZipStatus::Completed => "completed",
            ZipStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ZipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress snapshot; each poll replaces the previous one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipProgress {
    pub job_id: JobId,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub completed: u32,

    #[serde(default)]
    pub percent: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_file: Option<String>,

    pub status: ZipStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ZipProgress {
    /// Snapshot reported before the first real poll
    pub fn pending(job_id: JobId) -> Self {
        Self {
            job_id,
            total: 0,
            completed: 0,
            percent: 0.0,
            current_file: None,
            status: ZipStatus::Pending,
            error: None,
        }
    }
}

/// Downloaded archive plus the headers used to name it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZipPayload {
    pub bytes: Vec<u8>,
    pub x_filename: Option<String>,
    pub content_disposition: Option<String>,
}
