use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookmarks_core::{StorageError, ValidationError};
use thiserror::Error;
use tracing::{error, warn};

use crate::model::{ErrorResponse, UnauthorizedResponse};

pub type Result<T> = std::result::Result<T, AppError>;

pub const NOT_FOUND_MESSAGE: &str = "bookmark doesn't exist";
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Every failure a handler can answer with. This is the only place where
/// errors turn into status codes.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("bookmark doesn't exist")]
    NotFound,
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                warn!(error = %err, field = err.field(), "request validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(err.to_string())),
                )
                    .into_response()
            }
            AppError::BadRequest(message) => {
                warn!(error = %message, "malformed request body");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(NOT_FOUND_MESSAGE)),
            )
                .into_response(),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(UnauthorizedResponse {
                    error: "Unauthorized request".to_string(),
                }),
            )
                .into_response(),
            AppError::Storage(err) => {
                error!(error = %err, "storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
                )
                    .into_response()
            }
        }
    }
}
