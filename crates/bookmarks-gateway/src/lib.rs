//! HTTP surface of the bookmarks service.
//!
//! [`App::router`] builds the axum router over any
//! [`Repository`](bookmarks_core::Repository) held in an [`AppState`].

pub mod app;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
