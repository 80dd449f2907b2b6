use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_types::TypeError;
use storage::StorageError;
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::service::messages;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    /// Field-level form errors, every failing field collected
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl ProjectError {
    /// The title uniqueness failure, as a form error on `title`.
    pub fn duplicate_title() -> Self {
        let mut errors = ValidationErrors::new();
        errors.add("title", field_error("unique", messages::TITLE_TAKEN));
        ProjectError::Validation(errors)
    }
}

pub(crate) fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

impl From<StorageError> for ProjectError {
    fn from(err: StorageError) -> Self {
        ProjectError::Storage(err.to_string())
    }
}

impl From<TypeError> for ProjectError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::Internal(msg) => ProjectError::Internal(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ProjectError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProjectError::Internal(format!("Database error: {}", err))
    }
}

/// Convert ProjectError to AppError for standardized error responses
impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => AppError::NotFound(format!("Project {} not found", id)),
            ProjectError::Validation(errors) => AppError::ValidationError(errors),
            ProjectError::Storage(msg) => AppError::Storage(msg),
            ProjectError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
