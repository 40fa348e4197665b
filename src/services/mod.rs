//! Use cases behind the order dialog and row actions.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod orders;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    #[error("Form error: {0}")]
    Form(String),

    #[error("Type constraint error: {0}")]
    TypeConstraint(String),

    #[error("Remote service error: {0}")]
    Remote(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message) => ServiceError::TypeConstraint(message),
            other => ServiceError::Remote(other),
        }
    }
}
