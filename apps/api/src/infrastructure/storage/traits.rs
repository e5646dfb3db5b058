use crate::domain::analysis::value_objects::SanitizedFilename;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Write `data` under `filename`, replacing any file already there.
    async fn save(&self, filename: &SanitizedFilename, data: &[u8]) -> anyhow::Result<StoredUpload>;
    async fn read(&self, upload: &StoredUpload) -> anyhow::Result<Vec<u8>>;
}

/// Handle to a file written by an [`UploadStore`].
///
/// Unless retained, the file is removed when the handle is dropped, so every
/// exit path of a request cleans up after itself.
#[derive(Debug)]
pub struct StoredUpload {
    path: PathBuf,
    retain: bool,
}

impl StoredUpload {
    pub fn new(path: PathBuf, retain: bool) -> Self {
        Self { path, retain }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoredUpload {
    fn drop(&mut self) {
        if self.retain {
            return;
        }
        // One blocking unlink on the worker thread; move to spawn_blocking if this grows
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove upload")
            }
        }
    }
}
