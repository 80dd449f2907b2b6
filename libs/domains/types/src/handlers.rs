use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::errors::responses::InternalServerErrorResponse;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::TypeResult;
use crate::models::ProjectType;
use crate::repository::TypeRepository;

#[derive(OpenApi)]
#[openapi(
    paths(list_types),
    components(
        schemas(ProjectType),
        responses(InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Project type lookup")
    )
)]
pub struct ApiDoc;

pub fn router(repository: Arc<dyn TypeRepository>) -> Router {
    Router::new()
        .route("/", get(list_types))
        .with_state(repository)
}

/// List every project type
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All project types", body = Vec<ProjectType>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_types(
    State(repository): State<Arc<dyn TypeRepository>>,
) -> TypeResult<Json<Vec<ProjectType>>> {
    let types = repository.list().await?;
    Ok(Json(types))
}
