//! Project types: the read-only category list projects can be filed under.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_types::{handlers, InMemoryTypeRepository, TypeRepository};
//!
//! let repository: Arc<dyn TypeRepository> = Arc::new(InMemoryTypeRepository::with_labels(["Front-end"]));
//! let router = handlers::router(repository);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;

pub use error::{TypeError, TypeResult};
pub use models::ProjectType;
pub use postgres::PgTypeRepository;
pub use repository::{InMemoryTypeRepository, TypeRepository};
