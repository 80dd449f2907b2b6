//! Blob storage for uploaded files.
//!
//! Files are addressed by a reference of the form `<namespace>/<name>`, which is
//! what domain records persist. [`BlobStore::public_url`] turns a reference into
//! the URL the storage is served under.
//!
//! ```ignore
//! let store = LocalBlobStore::new("storage/app/public", "/storage");
//! let reference = store.put("project_images", bytes, "sito-vetrina.png").await?;
//! assert_eq!(reference, "project_images/sito-vetrina.png");
//! ```

mod config;
mod error;
mod local;
mod memory;

pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use local::LocalBlobStore;
pub use memory::InMemoryBlobStore;

use async_trait::async_trait;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` as `<namespace>/<name>`, replacing any existing file, and returns the reference.
    async fn put(&self, namespace: &str, bytes: Vec<u8>, name: &str) -> StorageResult<String>;

    /// Removes the file behind `reference`. Returns false when nothing was stored there.
    async fn delete(&self, reference: &str) -> StorageResult<bool>;

    async fn exists(&self, reference: &str) -> StorageResult<bool>;

    /// Base URL the stored files are served under, e.g. `/storage`
    fn public_base(&self) -> &str;

    fn public_url(&self, reference: &str) -> String {
        join_url(self.public_base(), reference)
    }
}

/// Validates a namespace/name pair and joins it into a reference.
pub(crate) fn reference_for(namespace: &str, name: &str) -> StorageResult<String> {
    check_segment(namespace)?;
    check_segment(name)?;
    Ok(format!("{namespace}/{name}"))
}

/// Splits and validates a stored reference.
pub(crate) fn split_reference(reference: &str) -> StorageResult<(&str, &str)> {
    let (namespace, name) = reference
        .split_once('/')
        .ok_or_else(|| StorageError::InvalidReference(reference.to_string()))?;
    check_segment(namespace)?;
    check_segment(name)?;
    Ok((namespace, name))
}

pub(crate) fn join_url(base: &str, reference: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), reference)
}

fn check_segment(segment: &str) -> StorageResult<()> {
    let valid = !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidReference(segment.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_for_joins_namespace_and_name() {
        assert_eq!(
            reference_for("project_images", "sito-vetrina.png").unwrap(),
            "project_images/sito-vetrina.png"
        );
    }

    #[test]
    fn test_reference_for_rejects_traversal() {
        assert!(reference_for("project_images", "../secrets").is_err());
        assert!(reference_for("..", "a.png").is_err());
        assert!(reference_for("project_images", "").is_err());
        assert!(reference_for("a/b", "c.png").is_err());
    }

    #[test]
    fn test_split_reference() {
        assert_eq!(
            split_reference("project_images/a.png").unwrap(),
            ("project_images", "a.png")
        );
        assert!(split_reference("no-namespace.png").is_err());
        assert!(split_reference("project_images/../../etc/passwd").is_err());
    }

    #[test]
    fn test_join_url_trims_trailing_slash() {
        assert_eq!(join_url("/storage/", "p/a.png"), "/storage/p/a.png");
        assert_eq!(
            join_url("https://cdn.example.com/storage", "p/a.png"),
            "https://cdn.example.com/storage/p/a.png"
        );
    }
}
