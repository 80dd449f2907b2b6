use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Project, ProjectRecord};

pub const TAG: &str = "Projects";

/// Sea-ORM Entity for the projects table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: Option<String>,
    pub is_completed: bool,
    pub type_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_types::entity::Entity",
        from = "Column::TypeId",
        to = "domain_types::entity::Column::Id",
        on_delete = "SetNull"
    )]
    Type,
}

impl Related<domain_types::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Type.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            description: model.description,
            image: model.image,
            is_completed: model.is_completed,
            type_id: model.type_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

impl From<ProjectRecord> for ActiveModel {
    fn from(record: ProjectRecord) -> Self {
        let now = chrono::Utc::now();

        ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(record.title),
            slug: Set(record.slug),
            description: Set(record.description),
            image: Set(record.image),
            is_completed: Set(record.is_completed),
            type_id: Set(record.type_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
        }
    }
}

impl ActiveModel {
    /// Sets the editable columns from `record`, leaving identity and trash state alone.
    pub fn apply_record(&mut self, record: ProjectRecord) {
        self.title = Set(record.title);
        self.slug = Set(record.slug);
        self.description = Set(record.description);
        self.image = Set(record.image);
        self.is_completed = Set(record.is_completed);
        self.type_id = Set(record.type_id);
        self.updated_at = Set(chrono::Utc::now().into());
    }
}
