//! # Axum Helpers
//!
//! Shared HTTP plumbing for the portfolio services.
//!
//! - **[`server`]**: router factory with OpenAPI docs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and structured error responses with error codes
//! - **[`extractors`]**: [`UuidPath`] and [`MultipartForm`]
//! - **[`audit`]**: audit log events

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{MultipartForm, UploadedFile, UuidPath};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
