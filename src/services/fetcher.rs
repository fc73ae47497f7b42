//! Content fetcher abstraction
//!
//! Resolves a content reference into the text that gets classified

use crate::utils::error::FetchError;
use async_trait::async_trait;

/// Collaborator that turns a URL into classifiable text
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the text behind `url`
    ///
    /// Any failure is reported as a single [`FetchError`]; no partial results.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Join a submission's title and body into one text
///
/// Missing parts become empty strings; the separator is always present.
pub fn join_title_and_body(title: Option<&str>, body: Option<&str>) -> String {
    format!("{}\n{}", title.unwrap_or_default(), body.unwrap_or_default())
}
