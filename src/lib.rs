//! Sentiment API Library
//!
//! Classifies the sentiment of raw text and Reddit submissions with VADER

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{build_router, create_router, AppState};
pub use models::{AnalyzeResponse, InputItem, Label, ResultRecord, SentimentRecord, Source};
pub use services::{BatchProcessor, ContentFetcher, RedditClient, SentimentScorer, VaderScorer};
pub use utils::error::{AppError, AppResult, FetchError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
