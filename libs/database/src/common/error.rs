/// Failures of the readiness probe.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("database did not answer the probe: {0}")]
    Unreachable(#[from] sea_orm::DbErr),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
