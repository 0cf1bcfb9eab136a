use thiserror::Error;

/// Error type that captures IO and serialization failures from the
/// configuration layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Domain-level failures. Every variant renders a message suitable for
/// direct display; nothing here is expected to panic through the API.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("ingredient `{0}` already exists")]
    DuplicateName(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("strategy type mismatch: expected `{expected}`, requested `{requested}`")]
    TypeMismatch { expected: String, requested: String },
    #[error("invalid wizard transition: {0}")]
    InvalidTransition(String),
    #[error("submission failed: {0}")]
    Submission(String),
    #[error("submission cancelled")]
    Cancelled,
}

impl ServiceError {
    /// True when the caller should redirect the user to an existing
    /// catalog entry instead of reporting a hard failure.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ServiceError::DuplicateName(_))
    }
}
