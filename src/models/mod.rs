//! Data models module
//!
//! Defines request and response data structures for the sentiment API

use serde::{Deserialize, Serialize};

pub mod analyze;

pub use analyze::{
    AnalyzeResponse, FailureRecord, InputItem, Label, ResultRecord, SentimentRecord, Source,
};

/// Generic API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
}

/// Error envelope returned for request-level failures
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}
