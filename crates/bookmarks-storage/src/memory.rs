use async_trait::async_trait;
use bookmarks_core::error::Result;
use bookmarks_core::{Bookmark, BookmarkId, BookmarkPatch, NewBookmark, Repository};
use parking_lot::RwLock;
use tracing::trace;
use uuid::Uuid;

/// In-memory implementation of the [`Repository`] trait.
///
/// Records live in a `Vec` so that listings come back in insertion order.
/// Every operation holds the lock for its whole duration, which makes each
/// one atomic with respect to the others.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: RwLock<Vec<Bookmark>>,
}

impl InMemoryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository preloaded with the given bookmarks.
    ///
    /// The caller is responsible for the ids being unique.
    pub fn with_bookmarks(bookmarks: impl IntoIterator<Item = Bookmark>) -> Self {
        Self {
            storage: RwLock::new(bookmarks.into_iter().collect()),
        }
    }

    /// Number of stored bookmarks.
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.read().is_empty()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, fields: NewBookmark) -> Result<Bookmark> {
        let bookmark = Bookmark::from_new(BookmarkId::new(Uuid::new_v4().to_string()), fields);
        self.storage.write().push(bookmark.clone());
        trace!(id = %bookmark.id, "stored bookmark in memory");
        Ok(bookmark)
    }

    async fn get_all(&self) -> Result<Vec<Bookmark>> {
        Ok(self.storage.read().clone())
    }

    async fn get_by_id(&self, id: &BookmarkId) -> Result<Option<Bookmark>> {
        Ok(self
            .storage
            .read()
            .iter()
            .find(|bookmark| &bookmark.id == id)
            .cloned())
    }

    async fn update(&self, id: &BookmarkId, patch: BookmarkPatch) -> Result<u64> {
        let mut storage = self.storage.write();
        let Some(bookmark) = storage.iter_mut().find(|bookmark| &bookmark.id == id) else {
            return Ok(0);
        };

        patch.apply_to(bookmark);
        Ok(1)
    }

    async fn delete(&self, id: &BookmarkId) -> Result<u64> {
        let mut storage = self.storage.write();
        let Some(index) = storage.iter().position(|bookmark| &bookmark.id == id) else {
            return Ok(0);
        };

        storage.remove(index);
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn fields(title: &str) -> NewBookmark {
        NewBookmark {
            title: title.to_string(),
            url: "http://x.com".to_string(),
            rating: 3,
            description: "d".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        let created = repo.insert(fields("A")).await.unwrap();
        let got = repo.get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(got, created);
        assert_eq!(got.title, "A");
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.insert(fields("A")).await.unwrap();
        let second = repo.insert(fields("A")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn get_all_on_empty_store() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_all().await.unwrap().is_empty());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn get_all_keeps_insertion_order() {
        let repo = InMemoryRepository::new();
        for title in ["first", "second", "third"] {
            repo.insert(fields(title)).await.unwrap();
        }

        let titles: Vec<_> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|bookmark| bookmark.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_by_id(&BookmarkId::new("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_supplied_fields() {
        let repo = InMemoryRepository::new();
        let created = repo.insert(fields("A")).await.unwrap();

        let patch = BookmarkPatch {
            title: Some("B".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.update(&created.id, patch).await.unwrap(), 1);

        let got = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(
            got,
            Bookmark {
                title: "B".to_string(),
                ..created
            }
        );
    }

    #[tokio::test]
    async fn update_nonexistent_returns_zero() {
        let repo = InMemoryRepository::new();
        let patch = BookmarkPatch {
            rating: Some(1),
            ..Default::default()
        };
        assert_eq!(repo.update(&BookmarkId::new("nope"), patch).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_twice() {
        let repo = InMemoryRepository::new();
        let created = repo.insert(fields("A")).await.unwrap();

        assert_eq!(repo.delete(&created.id).await.unwrap(), 1);
        assert_eq!(repo.delete(&created.id).await.unwrap(), 0);
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_keeps_other_records_in_order() {
        let repo = InMemoryRepository::new();
        let a = repo.insert(fields("a")).await.unwrap();
        let b = repo.insert(fields("b")).await.unwrap();
        let c = repo.insert(fields("c")).await.unwrap();

        repo.delete(&b.id).await.unwrap();

        assert_eq!(repo.get_all().await.unwrap(), vec![a, c]);
    }

    #[tokio::test]
    async fn preloaded_bookmarks_are_visible() {
        let seeded = Bookmark::from_new(BookmarkId::new("seed"), fields("seeded"));
        let repo = InMemoryRepository::with_bookmarks([seeded.clone()]);

        assert_eq!(repo.get_by_id(&seeded.id).await.unwrap(), Some(seeded));
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(fields(&format!("bookmark-{i:03}"))).await.unwrap()
            }));
        }

        let mut created = vec![];
        for handle in handles {
            created.push(handle.await.unwrap());
        }

        assert_eq!(repo.len(), 10);
        for bookmark in created {
            let got = repo.get_by_id(&bookmark.id).await.unwrap().unwrap();
            assert_eq!(got.title, bookmark.title);
        }
    }
}
