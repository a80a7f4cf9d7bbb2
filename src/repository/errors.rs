use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    /// A uniqueness rule rejected the write.
    #[error("conflicting record: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A JSON column could not be encoded or decoded.
    #[error("malformed stored data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}
