/// Errors raised by the connection and health-check helpers.
///
/// Domain repositories work with `sea_orm::DbErr` directly; this type only
/// covers the plumbing this crate owns.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
