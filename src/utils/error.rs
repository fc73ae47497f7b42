//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::models::{ApiError, ApiErrorResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Payload too large
    #[error("Payload too large")]
    PayloadTooLarge,
}

/// Errors raised while resolving a content reference
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL does not point at a Reddit submission
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Token exchange rejected or unusable
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport-level failure
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("received {status} HTTP response from {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    /// Submission does not exist or is not visible
    #[error("submission {0} not found")]
    NotFound(String),

    /// Response body was not the expected shape
    #[error("unexpected response payload: {0}")]
    Payload(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::PayloadTooLarge => "invalid_request_error",
        }
    }

    /// Convert to the JSON error envelope
    pub fn to_error_response(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            error: ApiError {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!("Client error: {} - Status code: {}", self, status);

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
