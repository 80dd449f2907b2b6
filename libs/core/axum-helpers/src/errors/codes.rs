//! Stable error codes carried by every error response.
//!
//! Ranges:
//! - 1000-1999: request and generic server errors
//! - 2000-2999: database errors
//! - 4000-4999: file storage errors
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
//! assert_eq!(ErrorCode::ValidationError.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One or more fields failed validation
    ValidationError,
    /// Path or query identifier is not a UUID
    InvalidUuid,
    /// Multipart body could not be read
    InvalidMultipart,
    NotFound,
    BadRequest,
    PayloadTooLarge,
    InternalError,
    ServiceUnavailable,

    DatabaseError,
    DatabaseNotFound,
    DatabaseConnection,

    StorageError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier sent to clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::StorageError => "STORAGE_ERROR",
        }
    }

    /// Numeric code used as the `error_code` log field
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::InvalidMultipart => 1003,
            Self::NotFound => 1004,
            Self::BadRequest => 1005,
            Self::PayloadTooLarge => 1006,
            Self::InternalError => 1100,
            Self::ServiceUnavailable => 1101,
            Self::DatabaseError => 2001,
            Self::DatabaseNotFound => 2002,
            Self::DatabaseConnection => 2003,
            Self::StorageError => 4001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::InvalidMultipart => "Failed to read multipart form",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::PayloadTooLarge => "Request payload too large",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::DatabaseNotFound => "Database record not found",
            Self::DatabaseConnection => "Database connection unavailable",
            Self::StorageError => "File storage error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_as_str_matches_strum_and_serde() {
        for code in ErrorCode::iter() {
            assert_eq!(code.as_str(), code.as_ref());
            assert_eq!(code.to_string(), code.as_str());
            assert_eq!(
                serde_json::to_string(&code).unwrap(),
                format!("\"{}\"", code.as_str())
            );
        }
    }

    #[test]
    fn test_numeric_codes_are_unique() {
        let codes: HashSet<i32> = ErrorCode::iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), ErrorCode::iter().count());
    }

    #[test]
    fn test_code_ranges() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::DatabaseError.code(), 2001);
        assert_eq!(ErrorCode::StorageError.code(), 4001);
    }

    #[test]
    fn test_deserialization() {
        let code: ErrorCode = serde_json::from_str("\"NOT_FOUND\"").unwrap();
        assert_eq!(code, ErrorCode::NotFound);
    }
}
