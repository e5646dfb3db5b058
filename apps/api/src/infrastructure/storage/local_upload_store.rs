use super::traits::{StoredUpload, UploadStore};
use crate::domain::analysis::value_objects::SanitizedFilename;
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Stores uploads as plain files in one local directory.
///
/// Two uploads that sanitize to the same name overwrite each other.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    root: PathBuf,
    retain: bool,
}

impl LocalUploadStore {
    /// Create the store, making sure `root` exists.
    pub async fn new(root: impl Into<PathBuf>, retain: bool) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create upload directory {}", root.display()))?;
        tracing::info!(path = %root.display(), retain, "Upload directory ready");
        Ok(Self { root, retain })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn save(&self, filename: &SanitizedFilename, data: &[u8]) -> anyhow::Result<StoredUpload> {
        let path = self.root.join(filename.as_str());
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("Failed to write upload {}", path.display()))?;
        tracing::debug!(path = %path.display(), size = data.len(), "Stored upload");
        Ok(StoredUpload::new(path, self.retain))
    }

    async fn read(&self, upload: &StoredUpload) -> anyhow::Result<Vec<u8>> {
        tokio::fs::read(upload.path())
            .await
            .with_context(|| format!("Failed to read upload {}", upload.path().display()))
    }
}
