use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::require_bearer_token;
use crate::handlers::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler, health_handler,
    list_bookmarks_handler, update_bookmark_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        let bookmarks = Router::new()
            .route(
                "/bookmarks",
                get(list_bookmarks_handler).post(create_bookmark_handler),
            )
            .route(
                "/bookmarks/{id}",
                get(get_bookmark_handler)
                    .patch(update_bookmark_handler)
                    .delete(delete_bookmark_handler),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_bearer_token,
            ));

        let api = match state.base_path() {
            "" => bookmarks,
            base_path => Router::new().nest(base_path, bookmarks),
        };

        Router::new()
            .route("/health", get(health_handler))
            .merge(api)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
