//! Persisting a downloaded archive
//!
//! Two targets mirror where an exported archive can go:
//! - [`DownloadSaver`] writes into a download directory, renaming on collision
//!   the way a browser does (`name (1).zip`)
//! - [`ShareSaver`] writes into `<cache>/downloads`, checks the file exists,
//!   then hands it to a [`ShareHandler`]

pub mod download;
pub mod share;

pub use download::DownloadSaver;
pub use share::{CommandShare, LogShare, ShareHandler, ShareRequest, ShareSaver};

use crate::config::{ExportConfig, SaveTarget};
use crate::domain::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub const ZIP_MIME_TYPE: &str = "application/zip";
pub const ZIP_UTI: &str = "public.zip-archive";

/// Bytes to persist under a resolved file name
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    /// Bare file name, no directory components
    pub file_name: &'a str,
    pub bytes: &'a [u8],
    pub mime_type: &'a str,
}

/// Where an artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub path: PathBuf,
    /// True when the file was also handed to a share handler
    pub shared: bool,
}

#[async_trait]
pub trait ArtifactSaver: Send + Sync {
    /// Persists the artifact
    ///
    /// # Errors
    ///
    /// [`crate::domain::ExportError::SaveFailed`] when the file could not be
    /// written or is missing afterwards, and
    /// [`crate::domain::ExportError::ShareFailed`] when the share step fails.
    async fn save(&self, artifact: Artifact<'_>) -> Result<SavedArtifact>;
}

/// Saver for the configured `export.target`
pub fn saver_for(config: &ExportConfig) -> Box<dyn ArtifactSaver> {
    match config.target {
        SaveTarget::Download => Box::new(DownloadSaver::new(&config.download_dir)),
        SaveTarget::Share => {
            let handler: Arc<dyn ShareHandler> = match config.share_command {
                Some(ref command) => Arc::new(CommandShare::from_command_line(command)),
                None => Arc::new(LogShare),
            };
            Box::new(ShareSaver::new(config.cache_root(), handler))
        }
    }
}
