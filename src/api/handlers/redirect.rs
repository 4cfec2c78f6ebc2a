//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}` (also mounted at `GET /api/urls/{code}`)
///
/// # Request Flow
///
/// 1. Atomically increment the click counter and stamp `lastAccessedAt`
/// 2. Return `302 Found` with `Location` set to the original URL
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist. No record is touched
/// in that case.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.url_service.resolve(&code).await?;

    tracing::debug!(code = %code, target = %url.original_url, clicks = url.click_count, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, url.original_url)]).into_response())
}
