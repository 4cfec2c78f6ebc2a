//! Handlers for reading, updating, and deleting shortened URLs.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::update_url::UpdateUrlRequest;
use crate::api::dto::url::{UrlMetadataResponse, UrlResponse};
use crate::api::extractors::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::resolve_base_url;

/// Returns metadata for one code without counting a click.
///
/// # Endpoint
///
/// `GET /api/urls/metadata/{code}`
///
/// # Response
///
/// ```json
/// {
///   "code": "example-1a2b3c",
///   "originalUrl": "https://www.example.com/page",
///   "createdAt": "2025-08-11T10:47:27Z",
///   "clickCount": 3,
///   "lastAccessedAt": "2025-08-12T08:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn metadata_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlMetadataResponse>, AppError> {
    let url = state.url_service.get(&code).await?;

    Ok(Json(url.into()))
}

/// Lists all shortened URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// Each item has the metadata fields plus `shortUrl`.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

    let urls = state.url_service.list().await?;

    Ok(Json(
        urls.into_iter()
            .map(|url| UrlResponse::from_entity(url, &base_url))
            .collect(),
    ))
}

/// Updates the destination and/or the code of a shortened URL.
///
/// # Endpoint
///
/// `PUT /api/urls/{code}`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://new-destination.com",  // optional
///   "newCode": "renamed-code"                       // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL or code is malformed.
/// Returns 404 Not Found if the code doesn't exist.
/// Returns 409 Conflict if `newCode` is already taken.
pub async fn update_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

    let url = state.url_service.update(&code, payload.into()).await?;

    Ok(Json(UrlResponse::from_entity(url, &base_url)))
}

/// Permanently deletes a shortened URL.
///
/// # Endpoint
///
/// `DELETE /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.url_service.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
