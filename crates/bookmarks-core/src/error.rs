use thiserror::Error;

/// Rejections produced by the validator before a payload reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("'{field}' must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("'rating' must be a number between 0 and 5")]
    InvalidRating(String),
    #[error("'url' must be a valid URL")]
    InvalidUrl(String),
    #[error("Request body must contain either 'title', 'url', 'rating' or 'description'")]
    EmptyUpdate,
    #[error("Request body must be a JSON object")]
    NotAnObject,
}

impl ValidationError {
    /// The payload field this error is about, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField(field) | ValidationError::EmptyField(field) => {
                Some(field)
            }
            ValidationError::InvalidType { field, .. } => Some(field),
            ValidationError::InvalidRating(_) => Some("rating"),
            ValidationError::InvalidUrl(_) => Some("url"),
            ValidationError::EmptyUpdate | ValidationError::NotAnObject => None,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
