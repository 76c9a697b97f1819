//! ZIP export flow
//!
//! Start the server job, poll it to a terminal status, fetch the archive once
//! and persist it:
//!
//! ```text
//! start -> pending -> processing* -> completed -> saving -> done
//!                              \-> failed | timeout | cancelled
//! ```
//!
//! The job id and the latest snapshot live only for the duration of one call.

use super::filename::resolve_file_name;
use super::policy::PollPolicy;
use crate::adapters::api::ZipJobApi;
use crate::adapters::artifact::{Artifact, ArtifactSaver, ZIP_MIME_TYPE};
use crate::domain::{CongregationId, ExportError, JobId, Result, ZipProgress, ZipStatus};
use crate::log_export_progress;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Message used when the server fails a job without saying why
pub const DEFAULT_FAILURE_MESSAGE: &str = "ZIP generation failed";

/// Which archive to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipExportRequest {
    pub congregation_id: CongregationId,
    pub service_year: i32,
}

/// Result of a completed export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub job_id: JobId,
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: usize,
    /// Progress polls issued
    pub attempts: u32,
    pub shared: bool,
    pub duration: Duration,
}

/// Drives one ZIP export against a job API and a saver
pub struct ZipExporter<'a> {
    api: &'a dyn ZipJobApi,
    saver: &'a dyn ArtifactSaver,
    policy: PollPolicy,
}

impl<'a> ZipExporter<'a> {
    pub fn new(api: &'a dyn ZipJobApi, saver: &'a dyn ArtifactSaver, policy: PollPolicy) -> Self {
        Self { api, saver, policy }
    }

    /// Runs the export
    ///
    /// `on_progress` receives a synthetic pending snapshot right after the job
    /// starts, then every polled snapshot in order, including the terminal one.
    ///
    /// # Errors
    ///
    /// - the server's error for a failed start, poll or download
    /// - [`ExportError::JobFailed`] with the server's message, or
    ///   [`DEFAULT_FAILURE_MESSAGE`]
    /// - [`ExportError::Timeout`] when `max_attempts` polls pass without a
    ///   terminal status
    /// - [`ExportError::Cancelled`] when the cancel signal is raised
    /// - the saver's error; the archive is not reported as exported
    pub async fn download_congregation_publishers_service_year_zip(
        &self,
        request: ZipExportRequest,
        mut on_progress: Option<&mut (dyn FnMut(&ZipProgress) + Send)>,
    ) -> Result<ExportOutcome> {
        let started = Instant::now();
        let mut cancel = self.policy.cancel.clone();

        if is_cancelled(&cancel) {
            return Err(ExportError::Cancelled.into());
        }

        let job = self
            .api
            .start_zip_generation(request.congregation_id, request.service_year)
            .await?;

        tracing::info!(
            job_id = %job.job_id,
            congregation_id = %request.congregation_id,
            service_year = request.service_year,
            "ZIP generation started"
        );

        if let Some(callback) = on_progress.as_deref_mut() {
            callback(&ZipProgress::pending(job.job_id.clone()));
        }

        let mut attempts = 0;
        let last = loop {
            if attempts >= self.policy.max_attempts {
                tracing::warn!(job_id = %job.job_id, attempts, "ZIP generation timed out");
                return Err(ExportError::Timeout { attempts }.into());
            }

            self.pause(&mut cancel).await?;
            attempts += 1;

            let progress = self.api.get_zip_progress(&job.job_id).await?;
            log_export_progress!(&progress, attempts);

            if let Some(callback) = on_progress.as_deref_mut() {
                callback(&progress);
            }

            if progress.status.is_terminal() {
                break progress;
            }
        };

        if last.status == ZipStatus::Failed {
            let message = last
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            tracing::warn!(job_id = %job.job_id, error = %message, "ZIP generation failed");
            return Err(ExportError::JobFailed(message).into());
        }

        let payload = self.api.get_zip_buffer(&job.job_id).await?;
        let file_name = resolve_file_name(&payload, request.service_year);

        tracing::debug!(
            job_id = %job.job_id,
            file_name = %file_name,
            bytes = payload.bytes.len(),
            "Saving archive"
        );

        let saved = self
            .saver
            .save(Artifact {
                file_name: &file_name,
                bytes: &payload.bytes,
                mime_type: ZIP_MIME_TYPE,
            })
            .await?;

        let outcome = ExportOutcome {
            job_id: job.job_id,
            file_name,
            path: saved.path,
            bytes: payload.bytes.len(),
            attempts,
            shared: saved.shared,
            duration: started.elapsed(),
        };

        tracing::info!(
            job_id = %outcome.job_id,
            path = %outcome.path.display(),
            attempts = outcome.attempts,
            duration_ms = outcome.duration.as_millis() as u64,
            "ZIP export completed"
        );

        Ok(outcome)
    }

    /// Waits one poll interval, returning early if the export is cancelled
    async fn pause(&self, cancel: &mut Option<watch::Receiver<bool>>) -> Result<()> {
        let sleep = tokio::time::sleep(self.policy.interval);
        tokio::pin!(sleep);

        let mut sender_gone = false;
        if let Some(rx) = cancel.as_mut() {
            loop {
                if *rx.borrow_and_update() {
                    return Err(ExportError::Cancelled.into());
                }
                tokio::select! {
                    _ = &mut sleep => return Ok(()),
                    changed = rx.changed() => {
                        if changed.is_err() {
                            if *rx.borrow() {
                                return Err(ExportError::Cancelled.into());
                            }
                            sender_gone = true;
                            break;
                        }
                    }
                }
            }
        }

        // Nobody can cancel any more
        if sender_gone {
            *cancel = None;
        }

        sleep.await;
        Ok(())
    }
}

fn is_cancelled(cancel: &Option<watch::Receiver<bool>>) -> bool {
    cancel.as_ref().is_some_and(|rx| *rx.borrow())
}
