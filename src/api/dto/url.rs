//! Response projections of a stored shortened URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortenedUrl;
use crate::utils::short_url::build_short_url;

/// Metadata for a single code (`GET /api/urls/metadata/{code}`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMetadataResponse {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl From<ShortenedUrl> for UrlMetadataResponse {
    fn from(url: ShortenedUrl) -> Self {
        Self {
            code: url.code,
            original_url: url.original_url,
            created_at: url.created_at,
            click_count: url.click_count,
            last_accessed_at: url.last_accessed_at,
        }
    }
}

/// Metadata plus the short-form address, used by list and update responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl UrlResponse {
    /// Projects a record, building its short-form address from `base_url`.
    pub fn from_entity(url: ShortenedUrl, base_url: &str) -> Self {
        Self {
            short_url: build_short_url(base_url, &url.code),
            code: url.code,
            original_url: url.original_url,
            created_at: url.created_at,
            click_count: url.click_count,
            last_accessed_at: url.last_accessed_at,
        }
    }
}
