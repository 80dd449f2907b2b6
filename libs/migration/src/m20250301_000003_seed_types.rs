use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                INSERT INTO types (id, label)
                VALUES
                    ('01950a3c-7c5f-7000-8000-000000000001', 'Front-end'),
                    ('01950a3c-7c5f-7000-8000-000000000002', 'Back-end'),
                    ('01950a3c-7c5f-7000-8000-000000000003', 'Full-stack')
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DELETE FROM types WHERE id IN (
                    '01950a3c-7c5f-7000-8000-000000000001',
                    '01950a3c-7c5f-7000-8000-000000000002',
                    '01950a3c-7c5f-7000-8000-000000000003'
                )
                "#,
            )
            .await?;

        Ok(())
    }
}
