//! Repository trait for shortened URL data access.

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UrlPatch, UrlTotals};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for managing shortened URLs.
///
/// Records are keyed by their unique `code`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `click_count = 0` and `created_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError>;

    /// Finds a record by its code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortenedUrl))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenedUrl>, AppError>;

    /// Returns true if a record with this code exists.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Lists all records, newest first.
    async fn list(&self) -> Result<Vec<ShortenedUrl>, AppError>;

    /// Atomically increments `click_count` and sets `last_accessed_at`.
    ///
    /// Returns the updated record, or `Ok(None)` if the code is unknown, in which
    /// case nothing is modified.
    async fn record_click(
        &self,
        code: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<Option<ShortenedUrl>, AppError>;

    /// Applies a partial update to the record identified by `code`.
    ///
    /// Returns `Ok(None)` if the code is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `patch.code` is already taken.
    async fn update(&self, code: &str, patch: UrlPatch) -> Result<Option<ShortenedUrl>, AppError>;

    /// Removes a record.
    ///
    /// Returns `Ok(true)` if a record was deleted, `Ok(false)` if not found.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Returns the number of records and the sum of their click counts.
    async fn totals(&self) -> Result<UrlTotals, AppError>;

    /// Checks that the underlying store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
