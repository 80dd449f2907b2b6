use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{BlobStore, StorageConfig, StorageResult, reference_for, split_reference};

/// Filesystem-backed store rooted at a public directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.root.clone(), config.public_url.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if missing.
    pub async fn ensure_root(&self) -> StorageResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, reference: &str) -> StorageResult<PathBuf> {
        let (namespace, name) = split_reference(reference)?;
        Ok(self.root.join(namespace).join(name))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, namespace: &str, bytes: Vec<u8>, name: &str) -> StorageResult<String> {
        let reference = reference_for(namespace, name)?;
        let dir = self.root.join(namespace);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(name), &bytes).await?;

        info!(reference = %reference, size = bytes.len(), "Stored file");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> StorageResult<bool> {
        let path = self.path_for(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(reference = %reference, "Deleted file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(reference = %reference, "File already absent");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, reference: &str) -> StorageResult<bool> {
        let path = self.path_for(reference)?;
        Ok(tokio::fs::try_exists(path).await?)
    }

    fn public_base(&self) -> &str {
        &self.public_url
    }
}
