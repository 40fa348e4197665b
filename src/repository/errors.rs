use thiserror::Error;

/// Failure reported by a remote data source or mutation service.
///
/// Cloneable so the last failure can be kept in the listing state and shown
/// next to the data it failed to replace.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote service responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return RepositoryError::NotFound;
            }
            return RepositoryError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }

        if err.is_decode() {
            return RepositoryError::Decode(err.to_string());
        }

        if err.is_timeout() {
            return RepositoryError::Transport(format!("Request timed out: {err}"));
        }

        if err.is_connect() || err.is_request() || err.is_body() {
            return RepositoryError::Transport(err.to_string());
        }

        RepositoryError::Unexpected(format!("Unexpected HTTP client error: {err}"))
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
