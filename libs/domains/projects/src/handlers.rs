use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, patch},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, MultipartForm, UuidPath,
    errors::responses::{
        BadRequestMultipartResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use domain_types::ProjectType;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::entity::TAG;
use crate::error::ProjectResult;
use crate::models::{Lifecycle, Page, Project, ProjectForm, ProjectFormSchema, ProjectQuery};
use crate::presentation::{CompletionBadge, ProjectView};
use crate::repository::ProjectRepository;
use crate::service::{ProjectService, messages};

/// Public path the router is mounted under; page links and undo actions point here.
pub const BASE_PATH: &str = "/api/admin/projects";

/// Upload limit for create and update bodies
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// OpenAPI documentation for the projects admin API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_projects,
        create_form,
        create_project,
        get_project,
        edit_form,
        update_project,
        delete_project,
        list_trashed,
        restore_project,
        purge_project,
    ),
    components(
        schemas(
            Project, ProjectView, Lifecycle, CompletionBadge, ProjectQuery, ProjectFormSchema,
            ProjectIndex, PageMeta, PageLinks, ProjectDetail, ProjectDraft, DraftProject,
            ProjectSaved, ProjectTrashed, UndoAction, TrashIndex, ProjectPurged, ProjectType
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestMultipartResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Portfolio project administration")
    )
)]
pub struct ApiDoc;

/// Paginated listing with the filter choices and navigation links.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectIndex {
    pub data: Vec<ProjectView>,
    pub meta: PageMeta,
    pub links: PageLinks,
    pub types: Vec<ProjectType>,
    /// Filters as received, echoed back for the filter form
    pub filters: ProjectQuery,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

/// Page URLs; each keeps the active filters.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetail {
    pub data: ProjectView,
    pub types: Vec<ProjectType>,
}

/// Empty form values for the create screen.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct DraftProject {
    pub title: String,
    pub description: String,
    pub type_id: Option<Uuid>,
    pub is_completed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDraft {
    pub data: DraftProject,
    pub types: Vec<ProjectType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectSaved {
    pub message: &'static str,
    pub data: ProjectView,
}

/// Request the client can replay to undo the deletion.
#[derive(Debug, Serialize, ToSchema)]
pub struct UndoAction {
    pub method: &'static str,
    pub href: String,
    pub label: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectTrashed {
    pub message: &'static str,
    pub data: ProjectView,
    pub undo: UndoAction,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrashIndex {
    pub data: Vec<ProjectView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectPurged {
    pub message: &'static str,
    pub id: Uuid,
}

/// Create the project router with all HTTP endpoints
pub fn router<R: ProjectRepository + 'static>(service: ProjectService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/create", get(create_form))
        .route("/trash", get(list_trashed))
        .route(
            "/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/{id}/edit", get(edit_form))
        .route("/{id}/restore", patch(restore_project))
        .route("/{id}/purge", delete(purge_project))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(shared_service)
}

fn view<R: ProjectRepository>(service: &ProjectService<R>, project: Project) -> ProjectView {
    ProjectView::new(project, service.storage().public_base())
}

fn page_url(query: &ProjectQuery, page: u64) -> String {
    let mut params: Vec<String> = query
        .filter_params()
        .into_iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();
    params.push(format!("page={page}"));

    format!("{BASE_PATH}?{}", params.join("&"))
}

fn page_links<T>(query: &ProjectQuery, page: &Page<T>) -> PageLinks {
    let last_page = page.last_page();

    PageLinks {
        first: page_url(query, 1),
        last: page_url(query, last_page),
        prev: (page.page > 1).then(|| page_url(query, (page.page - 1).min(last_page))),
        next: (page.page < last_page).then(|| page_url(query, page.page + 1)),
    }
}

fn audit(action: &str, id: Uuid, headers: &HeaderMap) -> AuditEvent {
    AuditEvent::new(action, format!("project:{id}"), AuditOutcome::Success)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
}

/// List active projects, filtered and paginated
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProjectQuery),
    responses(
        (status = 200, description = "One page of projects", body = ProjectIndex),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_projects<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    Query(query): Query<ProjectQuery>,
) -> ProjectResult<Json<ProjectIndex>> {
    let listing = service.list_projects(&query).await?;
    let page = listing.page;

    let meta = PageMeta {
        current_page: page.page,
        per_page: page.per_page,
        total: page.total,
        last_page: page.last_page(),
    };
    let links = page_links(&query, &page);
    let data = page.items.into_iter().map(|p| view(&service, p)).collect();

    Ok(Json(ProjectIndex {
        data,
        meta,
        links,
        types: listing.types,
        filters: ProjectQuery { page: None, ..query },
    }))
}

/// Blank form values and type choices for creating a project
#[utoipa::path(
    get,
    path = "/create",
    tag = TAG,
    responses(
        (status = 200, description = "Blank project draft", body = ProjectDraft),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_form<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
) -> ProjectResult<Json<ProjectDraft>> {
    Ok(Json(ProjectDraft {
        data: DraftProject::default(),
        types: service.list_types().await?,
    }))
}

/// Create a project from a multipart form
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body(content = ProjectFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Project created", body = ProjectSaved),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    form: MultipartForm,
) -> ProjectResult<impl IntoResponse> {
    let project = service.create_project(ProjectForm::from(form)).await?;

    audit("project.create", project.id, &headers)
        .with_details(json!({
            "title": project.title,
            "image": project.image,
        }))
        .log();

    Ok((
        StatusCode::CREATED,
        Json(ProjectSaved {
            message: messages::CREATED,
            data: view(&service, project),
        }),
    ))
}

/// Get an active project with the type choices
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectDetail),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<ProjectDetail>> {
    detail(&service, id).await.map(Json)
}

/// Current values of an active project for the edit screen
#[utoipa::path(
    get,
    path = "/{id}/edit",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectDetail),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn edit_form<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<ProjectDetail>> {
    detail(&service, id).await.map(Json)
}

async fn detail<R: ProjectRepository>(
    service: &ProjectService<R>,
    id: Uuid,
) -> ProjectResult<ProjectDetail> {
    let project = service.get_project(id).await?;
    Ok(ProjectDetail {
        data: view(service, project),
        types: service.list_types().await?,
    })
}

/// Replace a project from a multipart form
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body(content = ProjectFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Project updated", body = ProjectSaved),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    UuidPath(id): UuidPath,
    form: MultipartForm,
) -> ProjectResult<Json<ProjectSaved>> {
    let project = service.update_project(id, ProjectForm::from(form)).await?;

    Ok(Json(ProjectSaved {
        message: messages::UPDATED,
        data: view(&service, project),
    }))
}

/// Move a project to the trash
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project trashed, with an undo action", body = ProjectTrashed),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<ProjectTrashed>> {
    let project = service.delete_project(id).await?;

    audit("project.delete", id, &headers).log();

    Ok(Json(ProjectTrashed {
        message: messages::TRASHED,
        data: view(&service, project),
        undo: UndoAction {
            method: "PATCH",
            href: format!("{BASE_PATH}/{id}/restore"),
            label: messages::UNDO_LABEL,
            message: messages::TRASHED,
        },
    }))
}

/// List trashed projects, most recently deleted first
#[utoipa::path(
    get,
    path = "/trash",
    tag = TAG,
    responses(
        (status = 200, description = "Trashed projects", body = TrashIndex),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_trashed<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
) -> ProjectResult<Json<TrashIndex>> {
    let projects = service.list_trashed().await?;

    Ok(Json(TrashIndex {
        data: projects.into_iter().map(|p| view(&service, p)).collect(),
    }))
}

/// Take a project out of the trash
#[utoipa::path(
    patch,
    path = "/{id}/restore",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project restored", body = ProjectSaved),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn restore_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<ProjectSaved>> {
    let project = service.restore_project(id).await?;

    audit("project.restore", id, &headers).log();

    Ok(Json(ProjectSaved {
        message: messages::RESTORED,
        data: view(&service, project),
    }))
}

/// Delete a project permanently, trashed or not
#[utoipa::path(
    delete,
    path = "/{id}/purge",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted permanently", body = ProjectPurged),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn purge_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<ProjectPurged>> {
    let project = service.purge_project(id).await?;

    audit("project.purge", id, &headers)
        .with_details(json!({ "orphaned_image": project.image }))
        .log();

    Ok(Json(ProjectPurged {
        message: messages::PURGED,
        id,
    }))
}
