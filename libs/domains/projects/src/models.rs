use axum_helpers::{MultipartForm, UploadedFile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Projects per listing page
pub const PER_PAGE: u64 = 10;

/// Highest page whose offset still fits a Postgres `BIGINT`
pub const MAX_PAGE: u64 = i64::MAX as u64 / PER_PAGE;

/// Storage namespace for uploaded project images
pub const IMAGE_NAMESPACE: &str = "project_images";

/// Portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Unique identifier
    pub id: Uuid,
    /// Unique across active and trashed projects
    pub title: String,
    /// URL-safe form of the title
    pub slug: String,
    pub description: String,
    /// Storage reference, `project_images/<slug>.<ext>`
    pub image: Option<String>,
    pub is_completed: bool,
    pub type_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set while the project is in the trash
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Soft-delete state of a project, derived from `deleted_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Lifecycle {
    Active,
    SoftDeleted { deleted_at: DateTime<Utc> },
}

impl Project {
    /// Builds an active project from a record; ids and timestamps are assigned here.
    pub fn new(record: ProjectRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: record.title,
            slug: record.slug,
            description: record.description,
            image: record.image,
            is_completed: record.is_completed,
            type_id: record.type_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.deleted_at {
            None => Lifecycle::Active,
            Some(deleted_at) => Lifecycle::SoftDeleted { deleted_at },
        }
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whole-record replace of the form-editable columns.
    pub fn apply_record(&mut self, record: ProjectRecord) {
        self.title = record.title;
        self.slug = record.slug;
        self.description = record.description;
        self.image = record.image;
        self.is_completed = record.is_completed;
        self.type_id = record.type_id;
        self.updated_at = Utc::now();
    }
}

/// Columns written by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    pub is_completed: bool,
    pub type_id: Option<Uuid>,
}

/// Which side of the trash a lookup sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashScope {
    /// Default queries: trashed projects are invisible
    Active,
    WithTrashed,
    OnlyTrashed,
}

impl TrashScope {
    pub fn includes(self, project: &Project) -> bool {
        match self {
            TrashScope::Active => !project.is_trashed(),
            TrashScope::WithTrashed => true,
            TrashScope::OnlyTrashed => project.is_trashed(),
        }
    }
}

/// Query string of the listing endpoint.
///
/// Values arrive as raw strings; bad values narrow the result instead of failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProjectQuery {
    /// `completed` for finished projects, any other non-empty value for unfinished ones
    pub is_completed_filter: Option<String>,
    /// Type id
    pub type_filter: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

impl ProjectQuery {
    /// Requested page; missing, unparsable or < 1 reads as 1, larger than [`MAX_PAGE`] as
    /// [`MAX_PAGE`].
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .map_or(1, |p| p.min(MAX_PAGE))
    }

    /// Resolved filter, or `None` when the type filter can never match.
    pub fn filter(&self) -> Option<ProjectFilter> {
        let is_completed = non_empty(&self.is_completed_filter).map(|v| v == "completed");

        let type_id = match non_empty(&self.type_filter) {
            None => None,
            Some(raw) => Some(Uuid::parse_str(raw).ok()?),
        };

        Some(ProjectFilter {
            is_completed,
            type_id,
        })
    }

    /// Filter parameters to carry over into page links, empty ones dropped.
    pub fn filter_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(v) = non_empty(&self.is_completed_filter) {
            params.push(("is_completed_filter", v));
        }
        if let Some(v) = non_empty(&self.type_filter) {
            params.push(("type_filter", v));
        }
        params
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Filter passed to [`crate::ProjectRepository::list`]; `None` skips the clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub is_completed: Option<bool>,
    pub type_id: Option<Uuid>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.is_completed.is_none_or(|c| project.is_completed == c)
            && self.type_id.is_none_or(|t| project.type_id == Some(t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            per_page: PER_PAGE,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// One page of results plus the totals needed for navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Never below 1, even for an empty result.
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// Create/update form after multipart decoding.
///
/// Only presence is checked here; uniqueness, image content and type
/// existence need I/O and are checked by the service.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProjectForm {
    #[validate(required(message = "Il progetto deve avere un titolo"))]
    pub title: Option<String>,
    #[validate(required(message = "Il progetto deve avere una descrizione"))]
    pub description: Option<String>,
    /// Raw type id as submitted
    pub type_id: Option<String>,
    /// Checkbox semantics: true when the field was submitted at all
    pub is_completed: bool,
    pub image: Option<UploadedFile>,
}

impl From<MultipartForm> for ProjectForm {
    fn from(mut form: MultipartForm) -> Self {
        Self {
            title: form.text("title").map(str::to_owned),
            description: form.text("description").map(str::to_owned),
            type_id: form.text("type_id").map(str::to_owned),
            is_completed: form.contains("is_completed"),
            image: form.take_file("image"),
        }
    }
}

/// Multipart body of create and update, for the OpenAPI document only.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProjectFormSchema {
    title: String,
    description: String,
    /// Existing type id
    type_id: Option<Uuid>,
    /// Present means completed
    is_completed: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}
