//! Process-local implementation of the URL repository.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Data lives only as long as the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UrlPatch, UrlTotals};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// In-memory repository keyed by code.
///
/// All writes take the map's write lock, so renames and click increments are
/// serialized the same way row locks serialize them in PostgreSQL.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    records: RwLock<HashMap<String, ShortenedUrl>>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn code_taken(code: &str) -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": "short_urls_code_key", "code": code }),
    )
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError> {
        let mut records = self.records.write().await;

        if records.contains_key(&new_url.code) {
            return Err(code_taken(&new_url.code));
        }

        let record = ShortenedUrl::new(
            self.next_id.fetch_add(1, Ordering::Relaxed),
            new_url.code,
            new_url.original_url,
            Utc::now(),
            0,
            None,
        );
        records.insert(record.code.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenedUrl>, AppError> {
        Ok(self.records.read().await.get(code).cloned())
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.records.read().await.contains_key(code))
    }

    async fn list(&self) -> Result<Vec<ShortenedUrl>, AppError> {
        let mut rows: Vec<ShortenedUrl> = self.records.read().await.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn record_click(
        &self,
        code: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<Option<ShortenedUrl>, AppError> {
        let mut records = self.records.write().await;

        Ok(records.get_mut(code).map(|record| {
            let accessed_at = record
                .last_accessed_at
                .map_or(accessed_at, |previous| previous.max(accessed_at));
            record.register_click(accessed_at);
            record.clone()
        }))
    }

    async fn update(&self, code: &str, patch: UrlPatch) -> Result<Option<ShortenedUrl>, AppError> {
        let mut records = self.records.write().await;

        if !records.contains_key(code) {
            return Ok(None);
        }

        if let Some(new_code) = patch.code.as_deref()
            && new_code != code
            && records.contains_key(new_code)
        {
            return Err(code_taken(new_code));
        }

        let Some(mut record) = records.remove(code) else {
            return Ok(None);
        };

        if let Some(original_url) = patch.original_url {
            record.original_url = original_url;
        }
        if let Some(new_code) = patch.code {
            record.code = new_code;
        }

        records.insert(record.code.clone(), record.clone());

        Ok(Some(record))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.records.write().await.remove(code).is_some())
    }

    async fn totals(&self) -> Result<UrlTotals, AppError> {
        let records = self.records.read().await;

        Ok(UrlTotals {
            links: records.len() as i64,
            clicks: records.values().map(|r| r.click_count).sum(),
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_url(code: &str, url: &str) -> NewShortenedUrl {
        NewShortenedUrl {
            code: code.to_string(),
            original_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUrlRepository::new();

        let created = repo
            .create(new_url("abc123", "https://example.com/"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.click_count, 0);
        assert!(created.last_accessed_at.is_none());

        let found = repo.find_by_code("abc123").await.unwrap();
        assert_eq!(found, Some(created));
        assert!(repo.exists("abc123").await.unwrap());
        assert!(!repo.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate_code() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("dup", "https://a.com/")).await.unwrap();

        let result = repo.create(new_url("dup", "https://b.com/")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(repo.totals().await.unwrap().links, 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("first", "https://a.com/")).await.unwrap();
        repo.create(new_url("second", "https://b.com/")).await.unwrap();
        repo.create(new_url("third", "https://c.com/")).await.unwrap();

        let codes: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.code)
            .collect();

        assert_eq!(codes, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_record_click() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("clicky", "https://a.com/")).await.unwrap();

        let now = Utc::now();
        let updated = repo.record_click("clicky", now).await.unwrap().unwrap();
        assert_eq!(updated.click_count, 1);
        assert_eq!(updated.last_accessed_at, Some(now));

        // An earlier timestamp never moves last_accessed_at backwards.
        let earlier = now - Duration::seconds(10);
        let updated = repo.record_click("clicky", earlier).await.unwrap().unwrap();
        assert_eq!(updated.click_count, 2);
        assert_eq!(updated.last_accessed_at, Some(now));
    }

    #[tokio::test]
    async fn test_record_click_unknown_code() {
        let repo = InMemoryUrlRepository::new();

        let result = repo.record_click("nope", Utc::now()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_clicks_are_not_lost() {
        let repo = std::sync::Arc::new(InMemoryUrlRepository::new());
        repo.create(new_url("hot", "https://a.com/")).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.record_click("hot", Utc::now()).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = repo.find_by_code("hot").await.unwrap().unwrap();
        assert_eq!(record.click_count, 50);
    }

    #[tokio::test]
    async fn test_update_rename() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("old", "https://a.com/")).await.unwrap();

        let patch = UrlPatch {
            original_url: Some("https://b.com/".to_string()),
            code: Some("new".to_string()),
        };
        let updated = repo.update("old", patch).await.unwrap().unwrap();

        assert_eq!(updated.code, "new");
        assert_eq!(updated.original_url, "https://b.com/");
        assert!(!repo.exists("old").await.unwrap());
        assert!(repo.exists("new").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_rename_conflict_leaves_record() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("one", "https://a.com/")).await.unwrap();
        repo.create(new_url("two", "https://b.com/")).await.unwrap();

        let patch = UrlPatch {
            original_url: None,
            code: Some("two".to_string()),
        };
        let result = repo.update("one", patch).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        let one = repo.find_by_code("one").await.unwrap().unwrap();
        assert_eq!(one.original_url, "https://a.com/");
    }

    #[tokio::test]
    async fn test_update_unknown_code() {
        let repo = InMemoryUrlRepository::new();

        let result = repo.update("ghost", UrlPatch::default()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("bye", "https://a.com/")).await.unwrap();

        assert!(repo.delete("bye").await.unwrap());
        assert!(!repo.delete("bye").await.unwrap());
        assert!(repo.find_by_code("bye").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_totals() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("a", "https://a.com/")).await.unwrap();
        repo.create(new_url("b", "https://b.com/")).await.unwrap();
        repo.record_click("a", Utc::now()).await.unwrap();
        repo.record_click("a", Utc::now()).await.unwrap();
        repo.record_click("b", Utc::now()).await.unwrap();

        let totals = repo.totals().await.unwrap();

        assert_eq!(totals, UrlTotals { links: 2, clicks: 3 });
    }
}
