use std::sync::Arc;

use axum::Router;
use domain_types::{PgTypeRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(Arc::new(PgTypeRepository::new(state.db.clone())))
}
