use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookmarks_core::{serialize, validate_create, validate_update, BookmarkId, WireBookmark};
use serde_json::Value;
use tracing::{info, warn};

type JsonBody = std::result::Result<Json<Value>, JsonRejection>;

pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<WireBookmark>>> {
    let bookmarks = state.repository().get_all().await?;
    Ok(Json(bookmarks.iter().map(serialize).collect()))
}

pub async fn get_bookmark_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WireBookmark>> {
    let id = BookmarkId::new(id);

    match state.repository().get_by_id(&id).await? {
        Some(bookmark) => Ok(Json(serialize(&bookmark))),
        None => {
            warn!(id = %id, "bookmark not found");
            Err(AppError::NotFound)
        }
    }
}

pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    payload: JsonBody,
) -> Result<Response> {
    let Json(payload) = payload?;
    let fields = validate_create(&payload)?;

    let bookmark = state.repository().insert(fields).await?;
    info!(id = %bookmark.id, "bookmark created");

    let location = state.bookmark_location(&bookmark.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(serialize(&bookmark)),
    )
        .into_response())
}

pub async fn update_bookmark_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: JsonBody,
) -> Result<StatusCode> {
    let Json(payload) = payload?;
    let patch = validate_update(&payload)?;
    let id = BookmarkId::new(id);

    if state.repository().update(&id, patch).await? == 0 {
        warn!(id = %id, "bookmark not found");
        return Err(AppError::NotFound);
    }

    info!(id = %id, "bookmark updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_bookmark_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id = BookmarkId::new(id);

    if state.repository().delete(&id).await? == 0 {
        warn!(id = %id, "bookmark not found");
        return Err(AppError::NotFound);
    }

    info!(id = %id, "bookmark deleted");
    Ok(StatusCode::NO_CONTENT)
}
