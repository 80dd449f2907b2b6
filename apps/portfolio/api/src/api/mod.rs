use axum::{Router, routing::get};
use storage::StorageConfig;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub mod health;
pub mod projects;
pub mod types;

/// Admin API routes, nested under `/api` by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/admin/projects", projects::router(state))
        .nest("/admin/types", types::router(state))
}

/// `/ready` with database and storage checks.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Serves the upload root under the public URL when that URL is a local path.
///
/// An absolute public URL (a CDN, another host) leaves `app` untouched.
pub fn serve_uploads(app: Router, storage: &StorageConfig) -> Router {
    let public_path = storage.public_url.trim_end_matches('/');
    if public_path.starts_with('/') && public_path.len() > 1 {
        app.nest_service(public_path, ServeDir::new(&storage.root))
    } else {
        app
    }
}
