mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use regex::Regex;
use serde_json::json;
use shorturl::domain::repositories::UrlRepository;
use shorturl::infrastructure::persistence::InMemoryUrlRepository;
use shorturl::routes::router;
use shorturl::state::AppState;
use std::sync::Arc;

#[tokio::test]
async fn test_shorten_generates_readable_code() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({ "longUrl": "https://www.example.com/page" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = json["code"].as_str().unwrap();

    let pattern = Regex::new(r"^example-[0-9a-f]{6}$").unwrap();
    assert!(pattern.is_match(code), "unexpected code {code}");
    assert_eq!(json["shortUrl"], format!("http://sho.rt/r/{code}"));
    assert_eq!(response.header("location"), format!("http://sho.rt/r/{code}").as_str());

    let stored = repo.find_by_code(code).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://www.example.com/page");
    assert_eq!(stored.click_count, 0);
    assert!(stored.last_accessed_at.is_none());
}

#[tokio::test]
async fn test_shorten_with_custom_code() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({
            "longUrl": "https://example.com/docs",
            "customCode": "docs2024"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "docs2024");
    assert_eq!(json["shortUrl"], "http://sho.rt/r/docs2024");
}

#[tokio::test]
async fn test_shorten_empty_custom_code_is_generated() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({
            "longUrl": "https://github.com/rust-lang",
            "customCode": ""
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(json["code"].as_str().unwrap().starts_with("github-"));
}

#[tokio::test]
async fn test_shorten_duplicate_custom_code() {
    let (server, repo) = common::create_test_server();
    common::create_test_url(&repo, "taken", "https://a.com/").await;

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({
            "longUrl": "https://b.com/",
            "customCode": "taken"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "duplicate_code");

    let existing = repo.find_by_code("taken").await.unwrap().unwrap();
    assert_eq!(existing.original_url, "https://a.com/");
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({ "longUrl": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["code"], "validation_error");
    assert_eq!(repo.totals().await.unwrap().links, 0);
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (server, _repo) = common::create_test_server();

    let response = server.post("/api/urls/shorten").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_relative_url() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({ "longUrl": "/just/a/path" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(repo.totals().await.unwrap().links, 0);
}

#[tokio::test]
async fn test_shorten_invalid_custom_code() {
    let (server, _repo) = common::create_test_server();

    for bad in ["has-dash", "has space", "waytoolongcode1"] {
        let response = server
            .post("/api/urls/shorten")
            .json(&json!({
                "longUrl": "https://example.com",
                "customCode": bad
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(
            response.json::<serde_json::Value>()["code"],
            "validation_error"
        );
    }
}

#[tokio::test]
async fn test_shorten_same_url_twice_gets_distinct_codes() {
    let (server, repo) = common::create_test_server();

    let first = server
        .post("/api/urls/shorten")
        .json(&json!({ "longUrl": "https://example.com/same" }))
        .await
        .json::<serde_json::Value>();
    let second = server
        .post("/api/urls/shorten")
        .json(&json!({ "longUrl": "https://example.com/same" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(first["code"], second["code"]);
    assert_eq!(repo.totals().await.unwrap().links, 2);
}

#[tokio::test]
async fn test_shorten_base_url_from_host_header() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let state = AppState::new(repo, None);
    let server = TestServer::new(router(state)).unwrap();

    let response = server
        .post("/api/urls/shorten")
        .add_header("Host", "links.example.org:8080")
        .add_header("X-Forwarded-Proto", "https")
        .json(&json!({
            "longUrl": "https://example.com",
            "customCode": "hosted"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<serde_json::Value>()["shortUrl"],
        "https://links.example.org:8080/r/hosted"
    );
}

#[tokio::test]
async fn test_shorten_reserved_custom_code() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({
            "longUrl": "https://example.com",
            "customCode": "shorten"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["code"],
        "validation_error"
    );
    assert!(!repo.exists("shorten").await.unwrap());
}

#[tokio::test]
async fn test_shorten_wrong_field_type_is_json_error() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({ "longUrl": 5 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "validation_error");
    assert!(json["error"].is_string());
    assert_eq!(repo.totals().await.unwrap().links, 0);
}

#[tokio::test]
async fn test_shorten_malformed_json_is_json_error() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/urls/shorten")
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["code"],
        "validation_error"
    );
}
