//! Save into the cache and hand the file to a share handler

use super::{Artifact, ArtifactSaver, SavedArtifact, ZIP_MIME_TYPE, ZIP_UTI};
use crate::domain::{ExportError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a share handler is asked to present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub path: PathBuf,
    pub mime_type: String,
    pub dialog_title: String,
    /// Uniform type identifier for platforms that use one
    pub uti: String,
}

#[async_trait]
pub trait ShareHandler: Send + Sync {
    async fn share(&self, request: &ShareRequest) -> Result<()>;
}

/// Runs an external opener with the file path appended
#[derive(Debug, Clone)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line such as `"open -R"` on whitespace
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
        }
    }
}

#[async_trait]
impl ShareHandler for CommandShare {
    async fn share(&self, request: &ShareRequest) -> Result<()> {
        if self.program.is_empty() {
            return Err(ExportError::ShareFailed("share command is empty".to_string()).into());
        }

        tracing::debug!(
            program = %self.program,
            path = %request.path.display(),
            "Running share command"
        );

        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(&request.path)
            .status()
            .await
            .map_err(|e| ExportError::ShareFailed(format!("failed to start {}: {e}", self.program)))?;

        if !status.success() {
            return Err(ExportError::ShareFailed(format!("{} exited with {status}", self.program)).into());
        }
        Ok(())
    }
}

/// Logs the share request; used when no share command is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct LogShare;

#[async_trait]
impl ShareHandler for LogShare {
    async fn share(&self, request: &ShareRequest) -> Result<()> {
        tracing::info!(
            path = %request.path.display(),
            mime_type = %request.mime_type,
            title = %request.dialog_title,
            "Archive ready to share"
        );
        Ok(())
    }
}

pub struct ShareSaver {
    cache_root: PathBuf,
    handler: Arc<dyn ShareHandler>,
}

impl ShareSaver {
    pub fn new(cache_root: impl Into<PathBuf>, handler: Arc<dyn ShareHandler>) -> Self {
        Self {
            cache_root: cache_root.into(),
            handler,
        }
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.cache_root.join("downloads")
    }
}

async fn ensure_written(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(ExportError::SaveFailed(format!("{} was not written", path.display())).into()),
    }
}

#[async_trait]
impl ArtifactSaver for ShareSaver {
    async fn save(&self, artifact: Artifact<'_>) -> Result<SavedArtifact> {
        let dir = self.downloads_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ExportError::SaveFailed(format!("{}: {}", dir.display(), e)))?;

        // Same name overwrites the previous export
        let path = dir.join(artifact.file_name);
        tokio::fs::write(&path, artifact.bytes)
            .await
            .map_err(|e| ExportError::SaveFailed(format!("{}: {}", path.display(), e)))?;

        ensure_written(&path).await?;

        let mime_type = if artifact.mime_type.is_empty() {
            ZIP_MIME_TYPE
        } else {
            artifact.mime_type
        };
        let request = ShareRequest {
            path: path.clone(),
            mime_type: mime_type.to_string(),
            dialog_title: artifact.file_name.to_string(),
            uti: ZIP_UTI.to_string(),
        };
        self.handler.share(&request).await?;

        tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "Archive shared");

        Ok(SavedArtifact { path, shared: true })
    }
}
