//! DTO for the URL update endpoint.

use regex::Regex;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::UrlUpdate;

/// Renamed codes may also contain hyphens, so generated codes can be reused.
static NEW_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").unwrap());

/// Request body for `PUT /api/urls/{code}`.
///
/// Both fields are optional; absent or empty fields are left unchanged.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlRequest {
    /// New destination URL.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL must be at most 2048 characters"))]
    pub original_url: Option<String>,

    /// New code for this record.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 64, message = "Code must be at most 64 characters"))]
    #[validate(regex(
        path = *NEW_CODE_REGEX,
        message = "Code must contain only letters, numbers, or hyphen"
    ))]
    pub new_code: Option<String>,
}

impl From<UpdateUrlRequest> for UrlUpdate {
    fn from(req: UpdateUrlRequest) -> Self {
        UrlUpdate {
            original_url: req.original_url,
            new_code: req.new_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> UpdateUrlRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_body() {
        let req = parse(json!({}));

        assert!(req.original_url.is_none());
        assert!(req.new_code.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_new_code_with_hyphen() {
        let req = parse(json!({ "newCode": "example-1a2b3c" }));

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_new_code_invalid_chars() {
        let req = parse(json!({ "newCode": "bad code!" }));

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_new_code_too_long() {
        let req = parse(json!({ "newCode": "a".repeat(65) }));

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_into_url_update() {
        let update: UrlUpdate =
            parse(json!({ "originalUrl": "https://new.com", "newCode": "" })).into();

        assert_eq!(update.original_url.as_deref(), Some("https://new.com"));
        assert!(update.new_code.is_none());
    }
}
