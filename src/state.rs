//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    /// Public base for short-form addresses; derived from each request when unset.
    pub base_url: Option<String>,
}

impl AppState {
    /// Wires a service around `repository`.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: Option<String>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository)),
            base_url,
        }
    }
}
