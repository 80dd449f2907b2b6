use std::sync::Arc;

use axum::Router;
use domain_projects::{PgProjectRepository, ProjectService, handlers};
use domain_types::PgTypeRepository;

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgProjectRepository::new(state.db.clone());
    let types = Arc::new(PgTypeRepository::new(state.db.clone()));
    let service = ProjectService::new(repository, types, state.storage.clone());
    handlers::router(service)
}
