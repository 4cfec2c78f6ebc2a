//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UrlPatch, UrlTotals};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for shortened URL storage.
///
/// Code uniqueness is enforced by the `short_urls_code_key` constraint; unique
/// violations surface as [`AppError::Conflict`]. Click recording is a single
/// `UPDATE ... RETURNING`, so concurrent redirects never lose increments.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError> {
        let row = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            INSERT INTO short_urls (code, original_url)
            VALUES ($1, $2)
            RETURNING id, code, original_url, created_at, click_count, last_accessed_at
            "#,
        )
        .bind(&new_url.code)
        .bind(&new_url.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenedUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            SELECT id, code, original_url, created_at, click_count, last_accessed_at
            FROM short_urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM short_urls WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<ShortenedUrl>, AppError> {
        let rows = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            SELECT id, code, original_url, created_at, click_count, last_accessed_at
            FROM short_urls
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn record_click(
        &self,
        code: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<Option<ShortenedUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            UPDATE short_urls
            SET click_count = click_count + 1,
                last_accessed_at = GREATEST(last_accessed_at, $2)
            WHERE code = $1
            RETURNING id, code, original_url, created_at, click_count, last_accessed_at
            "#,
        )
        .bind(code)
        .bind(accessed_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn update(&self, code: &str, patch: UrlPatch) -> Result<Option<ShortenedUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            UPDATE short_urls
            SET original_url = COALESCE($2, original_url),
                code = COALESCE($3, code)
            WHERE code = $1
            RETURNING id, code, original_url, created_at, click_count, last_accessed_at
            "#,
        )
        .bind(code)
        .bind(patch.original_url)
        .bind(patch.code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn totals(&self) -> Result<UrlTotals, AppError> {
        let totals = sqlx::query_as::<_, UrlTotals>(
            r#"
            SELECT COUNT(*) AS links,
                   COALESCE(SUM(click_count), 0)::BIGINT AS clicks
            FROM short_urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(totals)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
