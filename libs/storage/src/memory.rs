use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{BlobStore, StorageResult, reference_for, split_reference};

/// Process-local store for tests and local runs without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(reference).cloned()
    }

    /// Stored references, sorted
    pub async fn references(&self) -> Vec<String> {
        let mut references: Vec<String> = self.files.read().await.keys().cloned().collect();
        references.sort();
        references
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, namespace: &str, bytes: Vec<u8>, name: &str) -> StorageResult<String> {
        let reference = reference_for(namespace, name)?;
        self.files.write().await.insert(reference.clone(), bytes);
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> StorageResult<bool> {
        split_reference(reference)?;
        Ok(self.files.write().await.remove(reference).is_some())
    }

    async fn exists(&self, reference: &str) -> StorageResult<bool> {
        Ok(self.files.read().await.contains_key(reference))
    }

    fn public_base(&self) -> &str {
        "/storage"
    }
}
