use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TypeResult;
use crate::models::ProjectType;

/// Read access to project types.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TypeRepository: Send + Sync {
    /// Every type, ordered by label
    async fn list(&self) -> TypeResult<Vec<ProjectType>>;

    async fn exists(&self, id: Uuid) -> TypeResult<bool>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryTypeRepository {
    types: Arc<RwLock<Vec<ProjectType>>>,
}

impl InMemoryTypeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let types = labels.into_iter().map(ProjectType::new).collect();
        Self {
            types: Arc::new(RwLock::new(types)),
        }
    }

    pub async fn insert(&self, label: impl Into<String>) -> ProjectType {
        let project_type = ProjectType::new(label);
        self.types.write().await.push(project_type.clone());
        project_type
    }
}

#[async_trait]
impl TypeRepository for InMemoryTypeRepository {
    async fn list(&self) -> TypeResult<Vec<ProjectType>> {
        let mut types = self.types.read().await.clone();
        types.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(types)
    }

    async fn exists(&self, id: Uuid) -> TypeResult<bool> {
        Ok(self.types.read().await.iter().any(|t| t.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_sorted_by_label() {
        let repo = InMemoryTypeRepository::with_labels(["Full-stack", "Back-end", "Front-end"]);

        let labels: Vec<String> = repo.list().await.unwrap().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["Back-end", "Front-end", "Full-stack"]);
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = InMemoryTypeRepository::new();
        let front_end = repo.insert("Front-end").await;

        assert!(repo.exists(front_end.id).await.unwrap());
        assert!(!repo.exists(Uuid::now_v7()).await.unwrap());
    }
}
