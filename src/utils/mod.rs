//! Utility functions for code generation, URL validation, and response shaping.
//!
//! - [`code_generator`] - Host-derived short code generation
//! - [`url_validator`] - Absolute URL validation
//! - [`short_url`] - Short-form address construction from config or request headers

pub mod code_generator;
pub mod short_url;
pub mod url_validator;
