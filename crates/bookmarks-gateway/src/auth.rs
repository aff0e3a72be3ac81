use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Rejects requests without the configured bearer token.
///
/// Passes everything through when no token is configured.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.api_token() else {
        return Ok(next.run(request).await);
    };

    let supplied = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if supplied != Some(expected) {
        warn!(path = %request.uri().path(), "unauthorized request");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
