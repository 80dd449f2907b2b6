//! Projects Domain
//!
//! Admin management of portfolio projects: filtered and paginated listing,
//! create/update from multipart forms with image upload, soft delete with
//! trash, restore and purge.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit log, response views
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Form validation, slugs, image lifecycle
//! └──────┬──────┘
//!        │                     ┌───────────────┐
//! ┌──────▼──────┐              │ TypeRepository│
//! │ Repository  │              │ BlobStore     │
//! └──────┬──────┘              └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Project record, lifecycle, filters, pages
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_projects::{handlers, InMemoryProjectRepository, ProjectService};
//! use domain_types::InMemoryTypeRepository;
//! use storage::InMemoryBlobStore;
//!
//! let service = ProjectService::new(
//!     InMemoryProjectRepository::new(),
//!     Arc::new(InMemoryTypeRepository::new()),
//!     Arc::new(InMemoryBlobStore::new()),
//! );
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod presentation;
pub mod repository;
pub mod service;
pub mod slug;

pub use error::{ProjectError, ProjectResult};
pub use models::{
    IMAGE_NAMESPACE, Lifecycle, MAX_PAGE, PER_PAGE, Page, PageRequest, Project, ProjectFilter,
    ProjectForm, ProjectQuery, ProjectRecord, TrashScope,
};
pub use postgres::PgProjectRepository;
pub use presentation::ProjectView;
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use service::{ProjectListing, ProjectService, messages};
pub use slug::slugify;
