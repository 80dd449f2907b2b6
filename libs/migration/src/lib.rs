pub use sea_orm_migration::prelude::*;

mod m20250301_000000_bootstrap;
mod m20250301_000001_create_types;
mod m20250301_000002_create_projects;
mod m20250301_000003_seed_types;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_bootstrap::Migration),
            Box::new(m20250301_000001_create_types::Migration),
            Box::new(m20250301_000002_create_projects::Migration),
            Box::new(m20250301_000003_seed_types::Migration),
        ]
    }
}
