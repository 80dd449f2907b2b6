use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProjectError, ProjectResult},
    models::{Page, PageRequest, Project, ProjectFilter, ProjectRecord, TrashScope},
    repository::ProjectRepository,
};

pub struct PgProjectRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_model(&self, id: Uuid, scope: TrashScope) -> ProjectResult<Option<entity::Model>> {
        let query = entity::Entity::find_by_id(id);
        let query = match scope {
            TrashScope::Active => query.filter(entity::Column::DeletedAt.is_null()),
            TrashScope::WithTrashed => query,
            TrashScope::OnlyTrashed => query.filter(entity::Column::DeletedAt.is_not_null()),
        };

        Ok(query.one(self.base.db()).await?)
    }
}

/// The title unique index reports a lost race with a concurrent writer.
fn map_write_error(err: DbErr) -> ProjectError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ProjectError::duplicate_title(),
        _ => err.into(),
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn insert(&self, record: ProjectRecord) -> ProjectResult<Project> {
        let active_model: entity::ActiveModel = record.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(map_write_error)?;

        tracing::debug!(project_id = %model.id, "Inserted project");
        Ok(model.into())
    }

    async fn find(&self, id: Uuid, scope: TrashScope) -> ProjectResult<Option<Project>> {
        Ok(self.find_model(id, scope).await?.map(Into::into))
    }

    async fn list(&self, filter: ProjectFilter, page: PageRequest) -> ProjectResult<Page<Project>> {
        let mut query = entity::Entity::find().filter(entity::Column::DeletedAt.is_null());

        if let Some(is_completed) = filter.is_completed {
            query = query.filter(entity::Column::IsCompleted.eq(is_completed));
        }

        if let Some(type_id) = filter.type_id {
            query = query.filter(entity::Column::TypeId.eq(type_id));
        }

        let paginator = query
            .order_by_desc(entity::Column::UpdatedAt)
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .paginate(self.base.db(), page.per_page);

        let total = paginator.num_items().await?;
        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), page, total));
        }
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn list_trashed(&self) -> ProjectResult<Vec<Project>> {
        let models = entity::Entity::find()
            .filter(entity::Column::DeletedAt.is_not_null())
            .order_by_desc(entity::Column::DeletedAt)
            .order_by_desc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn replace(&self, id: Uuid, record: ProjectRecord) -> ProjectResult<Option<Project>> {
        let Some(model) = self.find_model(id, TrashScope::Active).await? else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        active_model.apply_record(record);

        let updated = self
            .base
            .update(active_model)
            .await
            .map_err(map_write_error)?;

        tracing::debug!(project_id = %id, "Replaced project");
        Ok(Some(updated.into()))
    }

    async fn soft_delete(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let Some(model) = self.find_model(id, TrashScope::Active).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active_model = model.into_active_model();
        active_model.deleted_at = Set(Some(now.into()));
        active_model.updated_at = Set(now.into());

        let updated = self.base.update(active_model).await?;
        Ok(Some(updated.into()))
    }

    async fn restore(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let Some(model) = self.find_model(id, TrashScope::WithTrashed).await? else {
            return Ok(None);
        };

        if model.deleted_at.is_none() {
            return Ok(Some(model.into()));
        }

        let mut active_model = model.into_active_model();
        active_model.deleted_at = Set(None);
        active_model.updated_at = Set(Utc::now().into());

        let updated = self.base.update(active_model).await?;
        Ok(Some(updated.into()))
    }

    async fn purge(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let Some(model) = self.find_model(id, TrashScope::WithTrashed).await? else {
            return Ok(None);
        };

        if self.base.delete_by_id(id).await? == 0 {
            return Ok(None);
        }

        Ok(Some(model.into()))
    }

    async fn title_taken(&self, title: &str, except: Option<Uuid>) -> ProjectResult<bool> {
        let mut query = entity::Entity::find().filter(entity::Column::Title.eq(title));

        if let Some(id) = except {
            query = query.filter(entity::Column::Id.ne(id));
        }

        Ok(query.one(self.base.db()).await?.is_some())
    }
}
