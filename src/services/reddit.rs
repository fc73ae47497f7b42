//! Reddit API client
//!
//! Application-only OAuth client that resolves submission URLs into
//! `title + "\n" + selftext`.

use crate::config::RedditConfig;
use crate::services::fetcher::{join_title_and_body, ContentFetcher};
use crate::utils::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Refresh tokens this long before Reddit says they expire
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on how long a token is trusted, whatever `expires_in` says
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

fn default_expires_in() -> u64 {
    3600
}

/// Reddit OAuth token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
    error: Option<String>,
}

/// Reddit listing wrapper
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: SubmissionData,
}

#[derive(Debug, Deserialize)]
struct SubmissionData {
    title: Option<String>,
    selftext: Option<String>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// Reddit API client with a lazily refreshed access token
#[derive(Debug)]
pub struct RedditClient {
    client: Client,
    config: RedditConfig,
    token: Mutex<Option<AccessToken>>,
}

impl RedditClient {
    /// Create a new client; no network traffic happens until the first fetch
    pub fn new(config: RedditConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create Reddit HTTP client")?;

        Ok(Self {
            client,
            config,
            token: Mutex::new(None),
        })
    }

    /// Fetch a submission's title and body
    pub async fn fetch_submission(&self, url: &str) -> Result<String, FetchError> {
        let id = submission_id_from_url(url)?;
        let token = self.access_token().await?;

        let endpoint = format!("{}/api/info", self.config.api_base_url.trim_end_matches('/'));
        debug!("Fetching Reddit submission {} from {}", id, endpoint);

        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(&token)
            .query(&[("id", format!("t3_{}", id)), ("raw_json", "1".to_string())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // Force a fresh token on the next fetch
            self.token.lock().await.take();
        }
        if !status.is_success() {
            warn!("Reddit lookup for {} failed with status {}", id, status);
            return Err(FetchError::Status { status, endpoint });
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| FetchError::Payload(e.to_string()))?;

        let submission = listing
            .data
            .children
            .into_iter()
            .next()
            .ok_or(FetchError::NotFound(id))?;

        Ok(join_title_and_body(
            submission.data.title.as_deref(),
            submission.data.selftext.as_deref(),
        ))
    }

    async fn access_token(&self) -> Result<String, FetchError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken, FetchError> {
        let response = self
            .client
            .post(&self.config.auth_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Authentication(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Authentication(format!("token parse error: {}", e)))?;

        let value = match (body.access_token, body.error) {
            (Some(token), _) if !token.is_empty() => token,
            (_, Some(error)) => return Err(FetchError::Authentication(error)),
            _ => {
                return Err(FetchError::Authentication(
                    "token response missing access_token".to_string(),
                ))
            }
        };

        let lifetime = Duration::from_secs(body.expires_in).min(MAX_TOKEN_LIFETIME);
        let expires_at = Instant::now().checked_add(lifetime).ok_or_else(|| {
            FetchError::Authentication(format!("unusable token lifetime: {}s", body.expires_in))
        })?;

        info!("Obtained Reddit access token, expires in {}s", lifetime.as_secs());
        Ok(AccessToken { value, expires_at })
    }
}

#[async_trait]
impl ContentFetcher for RedditClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_submission(url).await
    }
}

/// Extract the base36 submission id from a Reddit URL
///
/// Only reddit.com and redd.it hosts (and their subdomains) are accepted. The
/// id follows `comments/` or `gallery/` when either is present; otherwise it
/// is the last path segment, as in `redd.it/<id>` or `reddit.com/<id>`.
/// Subreddit links are rejected. Scheme-less URLs are read as https.
pub fn submission_id_from_url(url: &str) -> Result<String, FetchError> {
    let invalid = || FetchError::InvalidUrl(url.to_string());

    let trimmed = url.trim();
    let parsed = Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{}", trimmed)))
        .map_err(|_| invalid())?;

    let host = parsed.host_str().ok_or_else(invalid)?;
    if !is_reddit_host(host) {
        return Err(invalid());
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let marker = segments
        .iter()
        .position(|segment| *segment == "comments" || *segment == "gallery");
    let id = match marker {
        Some(index) => segments.get(index + 1).copied(),
        None if segments.contains(&"r") => None,
        None => segments.last().copied(),
    };

    match id {
        Some(id) if id.chars().all(|c| c.is_ascii_alphanumeric()) => Ok(id.to_lowercase()),
        _ => Err(invalid()),
    }
}

fn is_reddit_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    ["reddit.com", "redd.it"]
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}
