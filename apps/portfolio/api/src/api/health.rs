use axum::{Json, extract::State, http::StatusCode};
use axum_helpers::{HealthCheckFuture, ReadyResponse, run_health_checks};

use crate::state::AppState;

/// Readiness: the database answers and the upload root is a directory.
pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let root = state.storage.root().to_path_buf();

    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "database",
            Box::pin(async {
                database::postgres::check_health(&state.db)
                    .await
                    .map_err(|e| format!("PostgreSQL: {e}"))
            }),
        ),
        (
            "storage",
            Box::pin(async move {
                match tokio::fs::metadata(&root).await {
                    Ok(meta) if meta.is_dir() => Ok(()),
                    Ok(_) => Err(format!("{} is not a directory", root.display())),
                    Err(e) => Err(format!("{}: {e}", root.display())),
                }
            }),
        ),
    ];

    run_health_checks(checks).await
}
