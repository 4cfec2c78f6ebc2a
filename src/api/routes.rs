//! API route configuration.

use crate::api::handlers::{
    delete_url_handler, list_urls_handler, metadata_handler, redirect_handler, shorten_handler,
    update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// URL management routes, mounted under `/api/urls`.
///
/// # Endpoints
///
/// - `POST   /shorten`          - Create a short URL
/// - `GET    /`                 - List all short URLs, newest first
/// - `GET    /metadata/{code}`  - Metadata for one code
/// - `GET    /{code}`           - Redirect (counts a click)
/// - `PUT    /{code}`           - Update destination and/or code
/// - `DELETE /{code}`           - Delete
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_urls_handler))
        .route("/shorten", post(shorten_handler))
        .route("/metadata/{code}", get(metadata_handler))
        .route(
            "/{code}",
            get(redirect_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
}
