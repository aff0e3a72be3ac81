//! Sample data for demo instances of the in-memory store.

use bookmarks_core::{Bookmark, BookmarkId};
use uuid::Uuid;

/// The three bookmarks a fresh demo instance starts with.
pub fn sample_bookmarks() -> Vec<Bookmark> {
    vec![
        Bookmark {
            id: BookmarkId::new(Uuid::new_v4().to_string()),
            title: "How to".to_string(),
            url: "https://www.thinkful1.com".to_string(),
            rating: 3,
            description: "Yodle".to_string(),
        },
        Bookmark {
            id: BookmarkId::new(Uuid::new_v4().to_string()),
            title: "Eating".to_string(),
            url: "https://www.thinkful2.com".to_string(),
            rating: 2,
            description: "Restaurants".to_string(),
        },
        Bookmark {
            id: BookmarkId::new("cjozyzcil0000lxygs3gyg2mr"),
            title: "Thinkful".to_string(),
            url: "https://www.thinkful.com".to_string(),
            rating: 5,
            description: "Think outside the classroom".to_string(),
        },
    ]
}
