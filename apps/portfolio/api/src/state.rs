//! Shared application state passed to the route builders.

use std::sync::Arc;

use storage::LocalBlobStore;

/// Cloned per router; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Public disk holding uploaded project images
    pub storage: Arc<LocalBlobStore>,
}
