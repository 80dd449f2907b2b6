use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TypeResult<T> = Result<T, TypeError>;

impl From<sea_orm::DbErr> for TypeError {
    fn from(err: sea_orm::DbErr) -> Self {
        TypeError::Internal(format!("Database error: {}", err))
    }
}

impl From<TypeError> for AppError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TypeError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
