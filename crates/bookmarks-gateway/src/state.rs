use std::sync::Arc;

use bookmarks_core::{BookmarkId, Repository};

#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn Repository>,
    base_path: Arc<str>,
    api_token: Option<Arc<str>>,
}

impl AppState {
    /// Creates state serving bookmarks at the root path with authentication off.
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            repository,
            base_path: Arc::from(""),
            api_token: None,
        }
    }

    /// Mounts the bookmark routes under `base_path` (e.g. `/api`).
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = Arc::from(normalize_base_path(base_path));
        self
    }

    /// Requires `Authorization: Bearer <token>` on bookmark routes.
    pub fn with_api_token(mut self, api_token: Option<String>) -> Self {
        self.api_token = api_token
            .filter(|token| !token.is_empty())
            .map(Arc::from);
        self
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    /// Either empty or a path starting with `/` and not ending with one.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    /// Path of a single bookmark resource, used for `Location` headers.
    pub fn bookmark_location(&self, id: &BookmarkId) -> String {
        format!("{}/bookmarks/{}", self.base_path, id)
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
