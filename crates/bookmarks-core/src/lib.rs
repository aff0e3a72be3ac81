//! Core types and traits for the bookmarks service.
//!
//! This crate holds everything that does not touch I/O: the bookmark model,
//! input validation, output sanitization and the [`Repository`] contract that
//! every record store implements.

pub mod bookmark;
pub mod error;
pub mod repository;
pub mod sanitize;
pub mod validate;

pub use bookmark::{Bookmark, BookmarkId, BookmarkPatch, NewBookmark};
pub use error::{StorageError, ValidationError};
pub use repository::Repository;
pub use sanitize::{escape_html, serialize, WireBookmark};
pub use validate::{validate_create, validate_update};
