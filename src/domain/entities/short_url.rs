//! Shortened URL entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored mapping between a short code and its original URL.
///
/// `id` and `created_at` are assigned by the store and never change.
/// `click_count` and `last_accessed_at` are only touched by redirects.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShortenedUrl {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl ShortenedUrl {
    /// Creates a new ShortenedUrl instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        click_count: i64,
        last_accessed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
            click_count,
            last_accessed_at,
        }
    }

    /// Applies one redirect: bumps the counter and stamps the access time.
    pub fn register_click(&mut self, accessed_at: DateTime<Utc>) {
        self.click_count += 1;
        self.last_accessed_at = Some(accessed_at);
    }
}

/// Input data for creating a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortenedUrl {
    pub code: String,
    pub original_url: String,
}

/// Partial update for an existing record.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPatch {
    pub original_url: Option<String>,
    pub code: Option<String>,
}

impl UrlPatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.original_url.is_none() && self.code.is_none()
    }
}

/// Aggregate counts across the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct UrlTotals {
    pub links: i64,
    pub clicks: i64,
}
