//! Handler for the URL shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extractors::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::{build_short_url, resolve_base_url};

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/urls/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://www.example.com/page",
///   "customCode": "promo2025"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with a `Location` header pointing at the short-form address:
///
/// ```json
/// {
///   "shortUrl": "https://sho.rt/r/example-1a2b3c",
///   "code": "example-1a2b3c"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid, the custom code is malformed,
/// or the custom code already exists.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ShortenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

    let created = state
        .url_service
        .shorten(&payload.long_url, payload.custom_code)
        .await?;

    let short_url = build_short_url(&base_url, &created.code);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, short_url.clone())],
        Json(ShortenResponse {
            short_url,
            code: created.code,
        }),
    ))
}
