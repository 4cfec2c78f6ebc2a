//! Shortened URL service: creation, redirects, updates, and deletion.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UrlPatch, UrlTotals};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    FALLBACK_SUFFIX_LEN, SUFFIX_LEN, generate_code, host_label, is_reserved,
};
use crate::utils::url_validator::parse_absolute_url;

/// Attempts with the short suffix before switching to the long one.
const SHORT_SUFFIX_ATTEMPTS: usize = 8;

/// Attempts with the long suffix before giving up.
const LONG_SUFFIX_ATTEMPTS: usize = 4;

/// Requested changes for [`UrlService::update`].
#[derive(Debug, Clone, Default)]
pub struct UrlUpdate {
    pub original_url: Option<String>,
    pub new_code: Option<String>,
}

/// Service for the full lifecycle of shortened URLs.
///
/// Owns validation and code generation; the repository only stores what it is
/// given.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self { repository }
    }

    /// Creates a shortened URL.
    ///
    /// # Code Selection
    ///
    /// - If `custom_code` is provided (after trimming, non-empty), it is used as-is
    ///   unless it already exists
    /// - Otherwise a `<host-label>-<hex>` code is generated, see
    ///   [`Self::generate_unique_code`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or not absolute, or
    /// the custom code is reserved.
    /// Returns [`AppError::Duplicate`] if the custom code already exists.
    /// Returns [`AppError::Internal`] if no free code could be generated.
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_code: Option<String>,
    ) -> Result<ShortenedUrl, AppError> {
        let url = parse_absolute_url(long_url).map_err(|e| {
            AppError::bad_request(
                "Invalid or empty URL provided",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let custom_code = custom_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let is_custom = custom_code.is_some();
        let code = match custom_code {
            Some(custom) => {
                if is_reserved(&custom) {
                    return Err(reserved_code(&custom));
                }
                if self.repository.exists(&custom).await? {
                    return Err(duplicate_code(&custom));
                }
                custom
            }
            None => self.generate_unique_code(&host_label(&url)).await?,
        };

        let new_url = NewShortenedUrl {
            code: code.clone(),
            original_url: url.to_string(),
        };

        let created = match self.repository.create(new_url).await {
            Err(AppError::Conflict { .. }) if is_custom => return Err(duplicate_code(&code)),
            other => other?,
        };

        metrics::counter!("shorturl_links_created_total").increment(1);
        tracing::info!(code = %created.code, custom = is_custom, "Short URL created");

        Ok(created)
    }

    /// Resolves a code for redirection and records the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code doesn't exist; nothing is modified.
    pub async fn resolve(&self, code: &str) -> Result<ShortenedUrl, AppError> {
        let record = self
            .repository
            .record_click(code, Utc::now())
            .await?
            .ok_or_else(|| {
                tracing::debug!(code, "Redirect for unknown code");
                not_found(code)
            })?;

        metrics::counter!("shorturl_redirects_total").increment(1);

        Ok(record)
    }

    /// Retrieves a record without touching its click metrics.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code doesn't exist.
    pub async fn get(&self, code: &str) -> Result<ShortenedUrl, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Lists every record, newest first.
    pub async fn list(&self) -> Result<Vec<ShortenedUrl>, AppError> {
        self.repository.list().await
    }

    /// Updates the destination and/or the code of a record.
    ///
    /// Empty or whitespace-only fields are treated as absent. Renaming to the
    /// record's own code is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code doesn't exist.
    /// Returns [`AppError::Validation`] if the new URL is not absolute or the new
    /// code is reserved.
    /// Returns [`AppError::Conflict`] if the new code belongs to another record.
    pub async fn update(&self, code: &str, update: UrlUpdate) -> Result<ShortenedUrl, AppError> {
        let existing = self.get(code).await?;

        let mut patch = UrlPatch::default();

        if let Some(raw_url) = update.original_url.filter(|u| !u.trim().is_empty()) {
            let url = parse_absolute_url(&raw_url).map_err(|e| {
                AppError::bad_request("Invalid URL provided", json!({ "reason": e.to_string() }))
            })?;
            patch.original_url = Some(url.to_string());
        }

        if let Some(new_code) = update
            .new_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && c != code)
        {
            if is_reserved(&new_code) {
                return Err(reserved_code(&new_code));
            }
            if self.repository.exists(&new_code).await? {
                return Err(code_in_use(&new_code));
            }
            patch.code = Some(new_code);
        }

        if patch.is_empty() {
            return Ok(existing);
        }

        let renamed_to = patch.code.clone();
        let updated = match self.repository.update(code, patch).await {
            Err(AppError::Conflict { .. }) => {
                return Err(code_in_use(renamed_to.as_deref().unwrap_or(code)));
            }
            other => other?,
        }
        .ok_or_else(|| not_found(code))?;

        tracing::info!(code, new_code = %updated.code, "Short URL updated");

        Ok(updated)
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code doesn't exist.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.delete(code).await? {
            return Err(not_found(code));
        }

        metrics::counter!("shorturl_links_deleted_total").increment(1);
        tracing::info!(code, "Short URL deleted");

        Ok(())
    }

    /// Returns aggregate link and click counts.
    pub async fn totals(&self) -> Result<UrlTotals, AppError> {
        self.repository.totals().await
    }

    /// Checks that the backing store answers.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Generates a code not yet present in the store.
    ///
    /// Tries [`SHORT_SUFFIX_ATTEMPTS`] codes with a 6-character suffix, then
    /// [`LONG_SUFFIX_ATTEMPTS`] with a 12-character one, then fails.
    async fn generate_unique_code(&self, label: &str) -> Result<String, AppError> {
        let suffix_lengths = std::iter::repeat_n(SUFFIX_LEN, SHORT_SUFFIX_ATTEMPTS)
            .chain(std::iter::repeat_n(FALLBACK_SUFFIX_LEN, LONG_SUFFIX_ATTEMPTS));

        for suffix_len in suffix_lengths {
            let code = generate_code(label, suffix_len);

            if !self.repository.exists(&code).await? {
                return Ok(code);
            }

            tracing::debug!(code = %code, "Generated code collided, retrying");
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "label": label }),
        ))
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Shortened URL not found", json!({ "code": code }))
}

fn duplicate_code(code: &str) -> AppError {
    AppError::duplicate(
        "Custom code already exists. Please choose a different code",
        json!({ "code": code }),
    )
}

fn reserved_code(code: &str) -> AppError {
    AppError::bad_request("This code is reserved", json!({ "code": code }))
}

fn code_in_use(code: &str) -> AppError {
    AppError::conflict(
        "Code already exists. Choose a different code",
        json!({ "code": code }),
    )
}
