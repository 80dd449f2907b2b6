use std::sync::Arc;
use std::time::Duration;

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use storage::LocalBlobStore;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors are colored
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let storage = LocalBlobStore::from_config(&config.storage);
    storage
        .ensure_root()
        .await
        .map_err(|e| eyre::eyre!("Storage root unavailable: {}", e))?;
    info!(root = %storage.root().display(), "Serving uploads from local disk");

    let state = AppState {
        config,
        db,
        storage: Arc::new(storage),
    };

    let api_routes = api::routes(&state);

    // Docs, CORS, tracing and compression around the /api routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));
    let app = api::serve_uploads(app, &state.config.storage);

    let server_config = state.config.server.clone();

    info!("Starting portfolio admin API (30s shutdown timeout)");

    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match state.db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Portfolio API shutdown complete");
    Ok(())
}
