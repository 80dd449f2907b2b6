use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_types::Types;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_uuid(Projects::Id))
                    // Unique across active and trashed rows
                    .col(string(Projects::Title).unique_key())
                    .col(string(Projects::Slug))
                    .col(text(Projects::Description))
                    .col(string_null(Projects::Image))
                    .col(boolean(Projects::IsCompleted).default(false))
                    .col(uuid_null(Projects::TypeId))
                    .col(
                        timestamp_with_time_zone(Projects::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Projects::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Projects::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_type_id")
                            .from(Projects::Table, Projects::TypeId)
                            .to(Types::Table, Types::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_projects_updated_at", Projects::UpdatedAt),
            ("idx_projects_created_at", Projects::CreatedAt),
            ("idx_projects_is_completed", Projects::IsCompleted),
            ("idx_projects_type_id", Projects::TypeId),
            ("idx_projects_deleted_at", Projects::DeletedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Projects::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER projects_touch_updated_at
                    BEFORE UPDATE ON projects
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS projects_touch_updated_at ON projects")
            .await?;

        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    Slug,
    Description,
    Image,
    IsCompleted,
    TypeId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
