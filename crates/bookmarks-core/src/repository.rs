use crate::bookmark::{Bookmark, BookmarkId, BookmarkPatch, NewBookmark};
use crate::error::Result;
use async_trait::async_trait;

/// Durable keyed storage for bookmarks.
///
/// Implementations must give every operation single-record atomicity. Inputs
/// are assumed to be validated already; stores never re-check field rules.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Stores a new bookmark under a freshly assigned id and returns it.
    async fn insert(&self, fields: NewBookmark) -> Result<Bookmark>;

    /// Returns every stored bookmark.
    ///
    /// The order is stable between calls; its exact definition is up to the
    /// implementation.
    async fn get_all(&self) -> Result<Vec<Bookmark>>;

    /// Looks up a bookmark by id. Returns `None` if no record has that id.
    async fn get_by_id(&self, id: &BookmarkId) -> Result<Option<Bookmark>>;

    /// Applies a partial update and returns the number of records changed.
    async fn update(&self, id: &BookmarkId, patch: BookmarkPatch) -> Result<u64>;

    /// Removes a bookmark permanently and returns the number of records removed.
    async fn delete(&self, id: &BookmarkId) -> Result<u64>;
}
