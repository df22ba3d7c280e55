//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`          - Create a link (JSON, urlencoded or multipart body)
/// - `GET    /links`          - List links, newest first
/// - `GET    /links/{code}`   - Get a link
/// - `DELETE /links/{code}`   - Delete a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
