//! Browser-style download into a directory

use super::{Artifact, ArtifactSaver, SavedArtifact};
use crate::domain::{ExportError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

const MAX_RENAMES: u32 = 1000;

pub struct DownloadSaver {
    dir: PathBuf,
    max_renames: u32,
}

impl DownloadSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_renames: MAX_RENAMES,
        }
    }

    /// Number of ` (n)` suffixes tried before giving up
    pub fn with_max_renames(mut self, max_renames: u32) -> Self {
        self.max_renames = max_renames;
        self
    }
}

/// `name.ext` for 0, `name (n).ext` after that
fn candidate_name(file_name: &str, n: u32) -> String {
    if n == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({n}).{ext}"),
        _ => format!("{file_name} ({n})"),
    }
}

/// Creates the first free file among `name.ext`, `name (1).ext`, ...
///
/// Files that already exist are never opened, so nothing is overwritten even
/// when another process is writing into the same directory.
async fn create_unique(dir: &Path, file_name: &str, max_renames: u32) -> Result<(PathBuf, File)> {
    for n in 0..=max_renames {
        let path = dir.join(candidate_name(file_name, n));
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        match opened {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(ExportError::SaveFailed(format!("{}: {}", path.display(), e)).into())
            }
        }
    }

    Err(ExportError::SaveFailed(format!(
        "{}: no free name for {} after {} renames",
        dir.display(),
        file_name,
        max_renames
    ))
    .into())
}

#[async_trait]
impl ArtifactSaver for DownloadSaver {
    async fn save(&self, artifact: Artifact<'_>) -> Result<SavedArtifact> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ExportError::SaveFailed(format!("{}: {}", self.dir.display(), e))
        })?;

        let (path, mut file) = create_unique(&self.dir, artifact.file_name, self.max_renames).await?;
        let write_failed =
            |e: std::io::Error| ExportError::SaveFailed(format!("{}: {}", path.display(), e));
        file.write_all(artifact.bytes).await.map_err(write_failed)?;
        file.flush().await.map_err(write_failed)?;

        tracing::info!(
            path = %path.display(),
            bytes = artifact.bytes.len(),
            mime_type = artifact.mime_type,
            "Archive downloaded"
        );

        Ok(SavedArtifact {
            path,
            shared: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::artifact::ZIP_MIME_TYPE;
    use crate::domain::AppError;
    use tempfile::TempDir;

    fn artifact<'a>(name: &'a str, bytes: &'a [u8]) -> Artifact<'a> {
        Artifact {
            file_name: name,
            bytes,
            mime_type: ZIP_MIME_TYPE,
        }
    }

    #[tokio::test]
    async fn test_writes_bytes() {
        let dir = TempDir::new().unwrap();
        let saver = DownloadSaver::new(dir.path().join("out"));
        let saved = saver.save(artifact("r.zip", b"PK\x03\x04")).await.unwrap();
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_renames_on_collision() {
        let dir = TempDir::new().unwrap();
        let saver = DownloadSaver::new(dir.path());
        let first = saver.save(artifact("r.zip", b"1")).await.unwrap();
        let second = saver.save(artifact("r.zip", b"2")).await.unwrap();
        let third = saver.save(artifact("r.zip", b"3")).await.unwrap();

        assert_eq!(first.path, dir.path().join("r.zip"));
        assert_eq!(second.path, dir.path().join("r (1).zip"));
        assert_eq!(third.path, dir.path().join("r (2).zip"));
        assert_eq!(std::fs::read(&first.path).unwrap(), b"1");
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(candidate_name("r.zip", 0), "r.zip");
        assert_eq!(candidate_name("r.zip", 3), "r (3).zip");
        assert_eq!(candidate_name("archive", 1), "archive (1)");
        assert_eq!(candidate_name(".hidden", 1), ".hidden (1)");
    }

    #[tokio::test]
    async fn test_existing_files_are_never_overwritten() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("r.zip"), b"mine").unwrap();
        std::fs::write(dir.path().join("r (1).zip"), b"also mine").unwrap();

        let saver = DownloadSaver::new(dir.path());
        let saved = saver.save(artifact("r.zip", b"new")).await.unwrap();

        assert_eq!(saved.path, dir.path().join("r (2).zip"));
        assert_eq!(std::fs::read(dir.path().join("r.zip")).unwrap(), b"mine");
        assert_eq!(std::fs::read(dir.path().join("r (1).zip")).unwrap(), b"also mine");
    }

    #[tokio::test]
    async fn test_fails_when_names_run_out() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("r.zip"), b"0").unwrap();
        std::fs::write(dir.path().join("r (1).zip"), b"1").unwrap();
        std::fs::write(dir.path().join("r (2).zip"), b"2").unwrap();

        let saver = DownloadSaver::new(dir.path()).with_max_renames(2);
        let err = saver.save(artifact("r.zip", b"new")).await.unwrap_err();

        assert!(matches!(err, AppError::Export(ExportError::SaveFailed(_))));
        assert_eq!(std::fs::read(dir.path().join("r (2).zip")).unwrap(), b"2");
        assert!(!dir.path().join("r (3).zip").exists());
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_save_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let saver = DownloadSaver::new(blocker.join("sub"));
        let err = saver.save(artifact("r.zip", b"1")).await.unwrap_err();
        assert!(matches!(err, AppError::Export(ExportError::SaveFailed(_))));
    }
}
