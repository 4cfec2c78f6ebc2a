//! Absolute URL validation.
//!
//! Accepts any URL that parses as an absolute, host-bearing URL and returns its
//! canonical serialization, which is what gets stored.

use url::Url;

/// Maximum length of a stored original URL.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur while validating a URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must be absolute and include a host")]
    MissingHost,

    #[error("URL must be at most {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Parses `input` as an absolute URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is ignored; an empty input is rejected
/// 2. Must parse as an absolute URL (relative references fail to parse)
/// 3. Must carry a non-empty host, which rules out `mailto:`, `javascript:`,
///    `data:` and similar opaque schemes
/// 4. The canonical form must fit in [`MAX_URL_LENGTH`] characters
///
/// The scheme and host are lower-cased by the parser; path, query and fragment
/// are kept as given.
///
/// # Examples
///
/// ```ignore
/// let url = parse_absolute_url("https://www.Example.com/page").unwrap();
/// assert_eq!(url.as_str(), "https://www.example.com/page");
///
/// assert!(parse_absolute_url("/relative/path").is_err());
/// ```
pub fn parse_absolute_url(input: &str) -> Result<Url, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    if url.as_str().len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    Ok(url)
}
