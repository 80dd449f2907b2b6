use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProjectResult;
use crate::models::{Page, PageRequest, Project, ProjectFilter, ProjectRecord, TrashScope};

/// Repository trait for Project persistence.
///
/// Methods returning `Option` report a missing row as `None`; the service
/// turns that into `ProjectError::NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, record: ProjectRecord) -> ProjectResult<Project>;

    async fn find(&self, id: Uuid, scope: TrashScope) -> ProjectResult<Option<Project>>;

    /// Active projects, newest update first
    async fn list(&self, filter: ProjectFilter, page: PageRequest) -> ProjectResult<Page<Project>>;

    /// Trashed projects, most recently deleted first
    async fn list_trashed(&self) -> ProjectResult<Vec<Project>>;

    /// Overwrites the editable columns of an active project.
    async fn replace(&self, id: Uuid, record: ProjectRecord) -> ProjectResult<Option<Project>>;

    /// Moves an active project to the trash.
    async fn soft_delete(&self, id: Uuid) -> ProjectResult<Option<Project>>;

    /// Clears the trash marker of a project in any state.
    async fn restore(&self, id: Uuid) -> ProjectResult<Option<Project>>;

    /// Removes the row for good, trashed or not; returns what was removed.
    async fn purge(&self, id: Uuid) -> ProjectResult<Option<Project>>;

    /// Exact title match across active and trashed projects, ignoring `except`.
    async fn title_taken(&self, title: &str, except: Option<Uuid>) -> ProjectResult<bool>;
}

/// Listing order: `updated_at` desc, `created_at` desc, `id` desc.
pub(crate) fn listing_order(a: &Project, b: &Project) -> std::cmp::Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(&self, record: ProjectRecord) -> ProjectResult<Project> {
        let project = Project::new(record);
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());

        tracing::debug!(project_id = %project.id, "Inserted project");
        Ok(project)
    }

    async fn find(&self, id: Uuid, scope: TrashScope) -> ProjectResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.get(&id).filter(|p| scope.includes(p)).cloned())
    }

    async fn list(&self, filter: ProjectFilter, page: PageRequest) -> ProjectResult<Page<Project>> {
        let projects = self.projects.read().await;

        let mut matching: Vec<Project> = projects
            .values()
            .filter(|p| !p.is_trashed() && filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(listing_order);

        let total = matching.len() as u64;
        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn list_trashed(&self) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.read().await;

        let mut trashed: Vec<Project> = projects.values().filter(|p| p.is_trashed()).cloned().collect();
        trashed.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at).then_with(|| b.id.cmp(&a.id)));

        Ok(trashed)
    }

    async fn replace(&self, id: Uuid, record: ProjectRecord) -> ProjectResult<Option<Project>> {
        let mut projects = self.projects.write().await;

        let Some(project) = projects.get_mut(&id).filter(|p| !p.is_trashed()) else {
            return Ok(None);
        };
        project.apply_record(record);

        Ok(Some(project.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let mut projects = self.projects.write().await;

        let Some(project) = projects.get_mut(&id).filter(|p| !p.is_trashed()) else {
            return Ok(None);
        };
        let now = Utc::now();
        project.deleted_at = Some(now);
        project.updated_at = now;

        Ok(Some(project.clone()))
    }

    async fn restore(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let mut projects = self.projects.write().await;

        let Some(project) = projects.get_mut(&id) else {
            return Ok(None);
        };
        if project.deleted_at.take().is_some() {
            project.updated_at = Utc::now();
        }

        Ok(Some(project.clone()))
    }

    async fn purge(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        Ok(self.projects.write().await.remove(&id))
    }

    async fn title_taken(&self, title: &str, except: Option<Uuid>) -> ProjectResult<bool> {
        let projects = self.projects.read().await;
        Ok(projects
            .values()
            .any(|p| p.title == title && Some(p.id) != except))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slugify;

    fn record(title: &str, is_completed: bool) -> ProjectRecord {
        ProjectRecord {
            title: title.to_string(),
            slug: slugify(title),
            description: format!("{title} description"),
            image: None,
            is_completed,
            type_id: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryProjectRepository::new();

        let project = repo.insert(record("Sito Vetrina", false)).await.unwrap();
        assert_eq!(project.slug, "sito-vetrina");
        assert!(project.deleted_at.is_none());

        let found = repo.find(project.id, TrashScope::Active).await.unwrap();
        assert_eq!(found, Some(project));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_default_scope() {
        let repo = InMemoryProjectRepository::new();
        let project = repo.insert(record("Blog", false)).await.unwrap();

        let trashed = repo.soft_delete(project.id).await.unwrap().unwrap();
        assert!(trashed.is_trashed());

        assert!(repo.find(project.id, TrashScope::Active).await.unwrap().is_none());
        assert!(repo.find(project.id, TrashScope::OnlyTrashed).await.unwrap().is_some());
        assert!(repo.soft_delete(project.id).await.unwrap().is_none());

        let page = repo.list(ProjectFilter::default(), PageRequest::new(1)).await.unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(repo.list_trashed().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_restore_any_state() {
        let repo = InMemoryProjectRepository::new();
        let project = repo.insert(record("Shop", false)).await.unwrap();

        let restored = repo.restore(project.id).await.unwrap().unwrap();
        assert_eq!(restored.updated_at, project.updated_at);

        repo.soft_delete(project.id).await.unwrap();
        let restored = repo.restore(project.id).await.unwrap().unwrap();
        assert!(!restored.is_trashed());

        assert!(repo.restore(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_skips_trashed() {
        let repo = InMemoryProjectRepository::new();
        let project = repo.insert(record("Old", true)).await.unwrap();

        let replaced = repo
            .replace(project.id, record("New", false))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.title, "New");
        assert_eq!(replaced.created_at, project.created_at);
        assert!(!replaced.is_completed);

        repo.soft_delete(project.id).await.unwrap();
        assert!(repo.replace(project.id, record("Newer", false)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_title_taken_includes_trash() {
        let repo = InMemoryProjectRepository::new();
        let project = repo.insert(record("Sito Vetrina", false)).await.unwrap();
        repo.soft_delete(project.id).await.unwrap();

        assert!(repo.title_taken("Sito Vetrina", None).await.unwrap());
        assert!(!repo.title_taken("Sito Vetrina", Some(project.id)).await.unwrap());
        assert!(!repo.title_taken("sito vetrina", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_pages_and_filters() {
        let repo = InMemoryProjectRepository::new();
        for i in 0..12 {
            repo.insert(record(&format!("Project {i}"), i % 3 == 0)).await.unwrap();
        }

        let first = repo.list(ProjectFilter::default(), PageRequest::new(1)).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 12);
        assert_eq!(first.last_page(), 2);

        let second = repo.list(ProjectFilter::default(), PageRequest::new(2)).await.unwrap();
        assert_eq!(second.items.len(), 2);

        let beyond = repo.list(ProjectFilter::default(), PageRequest::new(5)).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 12);

        let completed = ProjectFilter {
            is_completed: Some(true),
            type_id: None,
        };
        let page = repo.list(completed, PageRequest::new(1)).await.unwrap();
        assert_eq!(page.total, 4);
        assert!(page.items.iter().all(|p| p.is_completed));
    }

    #[tokio::test]
    async fn test_list_page_past_the_end() {
        let repo = InMemoryProjectRepository::new();
        for i in 0..3 {
            repo.insert(record(&format!("Project {i}"), false)).await.unwrap();
        }

        let page = repo
            .list(ProjectFilter::default(), PageRequest::new(u64::MAX))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, crate::models::MAX_PAGE);

        let page = repo.list(ProjectFilter::default(), PageRequest::new(2)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_purge_removes_everywhere() {
        let repo = InMemoryProjectRepository::new();
        let project = repo.insert(record("Gone", false)).await.unwrap();
        repo.soft_delete(project.id).await.unwrap();

        let purged = repo.purge(project.id).await.unwrap();
        assert_eq!(purged.map(|p| p.id), Some(project.id));

        assert!(repo.find(project.id, TrashScope::WithTrashed).await.unwrap().is_none());
        assert!(repo.purge(project.id).await.unwrap().is_none());
    }
}
