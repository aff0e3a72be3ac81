use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque identifier assigned by a record store on insert.
///
/// The in-memory store hands out UUIDs, the PostgreSQL store the decimal
/// form of its identity column. Callers must not assume either shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(String);

impl BookmarkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BookmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BookmarkId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BookmarkId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A stored bookmark record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    /// Always within `0..=5`.
    pub rating: u8,
    pub description: String,
}

impl Bookmark {
    /// Builds the stored record for freshly validated fields.
    pub fn from_new(id: BookmarkId, fields: NewBookmark) -> Self {
        Self {
            id,
            title: fields.title,
            url: fields.url,
            rating: fields.rating,
            description: fields.description,
        }
    }
}

/// Validated fields for a bookmark that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub rating: u8,
    pub description: String,
}

/// Validated partial update. Unset fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<u8>,
    pub description: Option<String>,
}

impl BookmarkPatch {
    /// Returns `true` when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.rating.is_none()
            && self.description.is_none()
    }

    /// Overwrites the fields this patch carries, leaving the rest untouched.
    pub fn apply_to(self, bookmark: &mut Bookmark) {
        if let Some(title) = self.title {
            bookmark.title = title;
        }
        if let Some(url) = self.url {
            bookmark.url = url;
        }
        if let Some(rating) = self.rating {
            bookmark.rating = rating;
        }
        if let Some(description) = self.description {
            bookmark.description = description;
        }
    }
}
