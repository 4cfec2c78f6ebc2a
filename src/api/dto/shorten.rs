//! DTOs for the shorten endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::Validate;

/// Custom codes on creation are plain alphanumerics.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Request to shorten a URL.
///
/// An empty `customCode` is treated as absent.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten; absolute-URL checks happen in the service.
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL must be at most 2048 characters"))]
    pub long_url: String,

    /// Optional custom short code.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 10, message = "Custom code must be at most 10 characters"))]
    #[validate(regex(
        path = *CUSTOM_CODE_REGEX,
        message = "Custom code must contain only letters and numbers"
    ))]
    pub custom_code: Option<String>,
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub code: String,
}
