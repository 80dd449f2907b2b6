use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Portfolio Admin API",
        version = "0.1.0",
        description = "Back-office management of portfolio projects and their types"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/admin/projects", api = domain_projects::handlers::ApiDoc),
        (path = "/admin/types", api = domain_types::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
