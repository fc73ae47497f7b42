//! Reddit client tests against a mock API

use httpmock::prelude::*;
use sentiment_api::config::RedditConfig;
use sentiment_api::services::{ContentFetcher, RedditClient};
use sentiment_api::FetchError;
use serde_json::json;

const SUBMISSION_URL: &str = "https://www.reddit.com/r/rust/comments/abc123/a_title/";
// base64("client-id:client-secret")
const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

fn reddit_config(server: &MockServer) -> RedditConfig {
    RedditConfig {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        user_agent: "sentiment-api-tests/0.1".to_string(),
        auth_url: server.url("/api/v1/access_token"),
        api_base_url: server.base_url(),
        timeout: 5,
    }
}

fn listing(title: Option<&str>, selftext: Option<&str>) -> serde_json::Value {
    json!({
        "kind": "Listing",
        "data": {
            "after": null,
            "children": [{
                "kind": "t3",
                "data": {"id": "abc123", "title": title, "selftext": selftext}
            }]
        }
    })
}

#[tokio::test]
async fn test_fetch_joins_title_and_body() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/access_token")
                .header("authorization", BASIC_AUTH)
                .body_contains("grant_type=client_credentials");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "token_type": "bearer", "expires_in": 3600}));
        })
        .await;
    let info = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/info")
                .query_param("id", "t3_abc123")
                .header("authorization", "Bearer tok-1")
                .header("user-agent", "sentiment-api-tests/0.1");
            then.status(200)
                .json_body(listing(Some("Great news"), Some("The release went well.")));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let text = client.fetch_text(SUBMISSION_URL).await.unwrap();

    assert_eq!(text, "Great news\nThe release went well.");
    token.assert_async().await;
    info.assert_async().await;
}

#[tokio::test]
async fn test_token_is_reused_between_fetches() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200)
                .json_body(json!({"access_token": "tok-2", "expires_in": 3600}));
        })
        .await;
    let info = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/info");
            then.status(200).json_body(listing(Some("Link post"), None));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    assert_eq!(client.fetch_text(SUBMISSION_URL).await.unwrap(), "Link post\n");
    assert_eq!(client.fetch_text("https://redd.it/abc123").await.unwrap(), "Link post\n");

    token.assert_hits_async(1).await;
    info.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_missing_title_and_body_become_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"access_token": "tok"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/info");
            then.status(200).json_body(listing(None, None));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    assert_eq!(client.fetch_text(SUBMISSION_URL).await.unwrap(), "\n");
}

#[tokio::test]
async fn test_empty_listing_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"access_token": "tok"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/info");
            then.status(200)
                .json_body(json!({"kind": "Listing", "data": {"children": []}}));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let error = client.fetch_text(SUBMISSION_URL).await.unwrap_err();

    assert!(matches!(error, FetchError::NotFound(ref id) if id == "abc123"));
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(401).json_body(json!({"message": "Unauthorized", "error": 401}));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let error = client.fetch_text(SUBMISSION_URL).await.unwrap_err();

    assert!(matches!(error, FetchError::Authentication(_)));
    assert!(error.to_string().contains("401"));
}

#[tokio::test]
async fn test_token_error_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"error": "invalid_grant"}));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let error = client.fetch_text(SUBMISSION_URL).await.unwrap_err();

    assert_eq!(error.to_string(), "authentication failed: invalid_grant");
}

#[tokio::test]
async fn test_unauthorized_lookup_drops_cached_token() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"access_token": "expired"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/info");
            then.status(401);
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    for _ in 0..2 {
        let error = client.fetch_text(SUBMISSION_URL).await.unwrap_err();
        assert!(matches!(
            error,
            FetchError::Status { status, .. } if status == reqwest::StatusCode::UNAUTHORIZED
        ));
    }

    token.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_rate_limited_lookup() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"access_token": "tok"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/info");
            then.status(429);
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let error = client.fetch_text(SUBMISSION_URL).await.unwrap_err();

    assert!(error.to_string().starts_with("received 429 Too Many Requests HTTP response from"));
}

#[tokio::test]
async fn test_malformed_listing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"access_token": "tok"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/info");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let error = client.fetch_text(SUBMISSION_URL).await.unwrap_err();

    assert!(matches!(error, FetchError::Payload(_)));
}

#[tokio::test]
async fn test_invalid_url_never_hits_network() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"access_token": "tok"}));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let error = client
        .fetch_text("https://www.reddit.com/r/rust/")
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Invalid URL: https://www.reddit.com/r/rust/");
    token.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_huge_token_lifetime_is_capped() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200)
                .json_body(json!({"access_token": "tok-long", "expires_in": u64::MAX}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/info")
                .header("authorization", "Bearer tok-long");
            then.status(200).json_body(listing(Some("Still here"), Some("")));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    assert_eq!(client.fetch_text("https://redd.it/abc123").await.unwrap(), "Still here\n");
    assert_eq!(client.fetch_text(SUBMISSION_URL).await.unwrap(), "Still here\n");

    token.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_foreign_host_never_hits_network() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"access_token": "tok"}));
        })
        .await;

    let client = RedditClient::new(reddit_config(&server)).unwrap();
    let error = client
        .fetch_text("https://example.com/comments/abc123")
        .await
        .unwrap_err();

    assert!(matches!(error, FetchError::InvalidUrl(_)));
    token.assert_hits_async(0).await;
}
