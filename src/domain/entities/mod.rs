//! Core domain entities.
//!
//! - [`ShortenedUrl`] - A stored short code to URL mapping with click metrics
//! - [`NewShortenedUrl`] - Input for creating a record
//! - [`UrlPatch`] - Partial update of an existing record
//! - [`UrlTotals`] - Aggregate counts across all records

pub mod short_url;

pub use short_url::{NewShortenedUrl, ShortenedUrl, UrlPatch, UrlTotals};
