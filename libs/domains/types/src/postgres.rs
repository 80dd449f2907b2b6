use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{entity, error::TypeResult, models::ProjectType, repository::TypeRepository};

pub struct PgTypeRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl TypeRepository for PgTypeRepository {
    async fn list(&self) -> TypeResult<Vec<ProjectType>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Label)
            .all(self.base.db())
            .await?;

        tracing::debug!(count = models.len(), "Loaded project types");
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists(&self, id: Uuid) -> TypeResult<bool> {
        Ok(self.base.find_by_id(id).await?.is_some())
    }
}
