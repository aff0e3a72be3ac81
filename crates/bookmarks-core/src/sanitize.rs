use crate::bookmark::Bookmark;
use serde::{Deserialize, Serialize};

/// Client-facing representation of a [`Bookmark`].
///
/// Free-text fields are HTML-escaped. Build it with [`serialize`] or
/// `WireBookmark::from(&bookmark)`; it is only ever produced on read paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: u8,
}

impl From<&Bookmark> for WireBookmark {
    fn from(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id.to_string(),
            title: escape_html(&bookmark.title),
            url: bookmark.url.clone(),
            description: escape_html(&bookmark.description),
            rating: bookmark.rating,
        }
    }
}

/// Maps a stored record to its sanitized wire form.
pub fn serialize(bookmark: &Bookmark) -> WireBookmark {
    WireBookmark::from(bookmark)
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::BookmarkId;

    fn bookmark(title: &str, description: &str) -> Bookmark {
        Bookmark {
            id: BookmarkId::new("42"),
            title: title.to_string(),
            url: "https://example.com/?a=1&b=<2>".to_string(),
            rating: 4,
            description: description.to_string(),
        }
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("Think outside the classroom"), "Think outside the classroom");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("xss")</script>"#),
            "&lt;script&gt;alert(&quot;xss&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#39;s");
    }

    #[test]
    fn serialize_escapes_free_text_only() {
        let stored = bookmark(
            "Naughty <script>alert(\"xss\");</script>",
            "Bad image <img src=\"https://url.to.file.which/does-not.exist\" onerror=\"alert(document.cookie);\">. But not <strong>all</strong> bad.",
        );
        let wire = serialize(&stored);

        assert_eq!(wire.id, "42");
        assert_eq!(
            wire.title,
            "Naughty &lt;script&gt;alert(&quot;xss&quot;);&lt;/script&gt;"
        );
        assert!(!wire.description.contains('<'));
        assert!(wire.description.contains("&lt;strong&gt;all&lt;/strong&gt;"));
        assert_eq!(wire.url, stored.url);
        assert_eq!(wire.rating, 4);
    }

    #[test]
    fn serialize_does_not_mutate_record() {
        let stored = bookmark("<b>bold</b>", "");
        let before = stored.clone();
        let _ = serialize(&stored);
        assert_eq!(stored, before);
    }

    #[test]
    fn rating_is_a_json_number() {
        let value = serde_json::to_value(serialize(&bookmark("t", "d"))).unwrap();
        assert_eq!(value["rating"], serde_json::json!(4));
        assert_eq!(value["id"], serde_json::json!("42"));
    }
}
