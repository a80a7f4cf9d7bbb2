use thiserror::Error;

use crate::forms::FieldIssue;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod discounts;
pub mod products;
pub mod testimonials;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures reported by the service layer to the HTTP handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    /// The request collides with an existing record.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A single malformed input.
    #[error("invalid input: {0}")]
    Form(String),
    /// Several rejected fields at once.
    #[error("validation failed")]
    Validation(Vec<FieldIssue>),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(message) => Self::Conflict(message),
            other => Self::Internal(other.to_string()),
        }
    }
}
