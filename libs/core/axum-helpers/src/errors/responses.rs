//! OpenAPI response components shared by the domain `ApiDoc`s.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1100,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - field validation failed",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "title": [{
                "code": "unique",
                "message": "Esiste già un progetto con questo titolo",
                "params": {"value": "Sito Vetrina"}
            }],
            "image": [{
                "code": "image",
                "message": "Il file inserito non è un immagine",
                "params": {}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "INVALID_UUID",
        "message": "Invalid UUID format"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed multipart body",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "INVALID_MULTIPART",
        "message": "Invalid `boundary` for `multipart/form-data` request"
    })
)]
pub struct BadRequestMultipartResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Project 0190f5a2-7c1e-7d3a-9f7e-2b1c3d4e5f60 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
