//! Short-form address construction.
//!
//! A short-form address is `{base}/r/{code}`. The base is the configured
//! `BASE_URL` when present, otherwise it is rebuilt from the incoming request.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Path prefix under which redirects are served.
pub const REDIRECT_PREFIX: &str = "/r/";

/// Resolves the public base URL for short-form addresses.
///
/// Priority:
/// 1. `configured` (from `BASE_URL`), trailing slashes removed
/// 2. `{scheme}://{host}` where scheme comes from `X-Forwarded-Proto`
///    (first value, defaulting to `http`) and host is the `Host` header
///    including its port
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base is configured and the `Host`
/// header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// let base = resolve_base_url(None, &headers).unwrap();
/// assert_eq!(base, "http://sho.rt:8080");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header", json!({})));
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| v.eq_ignore_ascii_case("http") || v.eq_ignore_ascii_case("https"))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "http".to_string());

    Ok(format!("{}://{}", scheme, host))
}

/// Joins a resolved base URL and a code into a short-form address.
pub fn build_short_url(base: &str, code: &str) -> String {
    format!("{}{}{}", base.trim_end_matches('/'), REDIRECT_PREFIX, code)
}
