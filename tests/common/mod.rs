#![allow(dead_code)]

use axum_test::TestServer;
use shorturl::domain::entities::{NewShortenedUrl, ShortenedUrl};
use shorturl::domain::repositories::UrlRepository;
use shorturl::infrastructure::persistence::InMemoryUrlRepository;
use shorturl::routes::router;
use shorturl::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt";

/// State backed by a fresh in-memory store with a fixed public base URL.
pub fn create_test_state() -> (AppState, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let state = AppState::new(repo.clone(), Some(BASE_URL.to_string()));
    (state, repo)
}

/// Full application router over a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<InMemoryUrlRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, repo)
}

pub async fn create_test_url(repo: &InMemoryUrlRepository, code: &str, url: &str) -> ShortenedUrl {
    repo.create(NewShortenedUrl {
        code: code.to_string(),
        original_url: url.to_string(),
    })
    .await
    .unwrap()
}
