//! Short code generation and validation utilities.
//!
//! Generated codes look like `<label>-<hex>`, where `<label>` is derived from the
//! target host (`https://www.example.com/page` gives `example`) and `<hex>` is a
//! random lowercase hexadecimal suffix.

use url::Url;

/// Label used when the host yields no alphanumeric characters.
pub const FALLBACK_LABEL: &str = "url";

/// Suffix length used for the first round of attempts.
pub const SUFFIX_LEN: usize = 6;

/// Longer suffix used once the short one keeps colliding.
pub const FALLBACK_SUFFIX_LEN: usize = 12;

/// Maximum length of any stored code.
pub const MAX_CODE_LENGTH: usize = 64;

/// Codes that collide with static segments under `/api/urls/`.
pub const RESERVED_CODES: &[&str] = &["shorten"];

/// Returns whether `code` is taken by a route and cannot be stored.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Derives the human-readable part of a generated code from a URL's host.
///
/// Takes the lower-cased host, strips a leading `www.`, keeps the first
/// dot-separated label and drops every non-alphanumeric character. Falls back
/// to [`FALLBACK_LABEL`] when nothing is left.
///
/// The label is capped so that `label-suffix` always fits in [`MAX_CODE_LENGTH`].
///
/// # Examples
///
/// ```ignore
/// let url = Url::parse("https://www.example.com/page").unwrap();
/// assert_eq!(host_label(&url), "example");
/// ```
pub fn host_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let first = host.split('.').next().unwrap_or_default();

    let label: String = first
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(MAX_CODE_LENGTH - FALLBACK_SUFFIX_LEN - 1)
        .collect();

    if label.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        label
    }
}

/// Returns `len` random lowercase hex characters.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn random_suffix(len: usize) -> String {
    let mut buffer = vec![0u8; len.div_ceil(2)];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut suffix = hex::encode(buffer);
    suffix.truncate(len);
    suffix
}

/// Builds a candidate code from a label and a fresh random suffix.
pub fn generate_code(label: &str, suffix_len: usize) -> String {
    format!("{}-{}", label, random_suffix(suffix_len))
}
