//! Sentiment analysis handler
//!
//! POST /analyze

use crate::handlers::AppState;
use crate::models::{AnalyzeResponse, InputItem};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_batch_log_summary;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Classify a batch of texts and Reddit URLs
///
/// Item-level problems are reported inside `results`; only a malformed batch
/// produces an error status.
pub async fn handle_analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<InputItem>>, JsonRejection>,
) -> AppResult<Json<AnalyzeResponse>> {
    let Json(items) = payload.map_err(rejection_to_error)?;

    debug!("📥 Analyze batch: {}", create_batch_log_summary(&items));

    let results = state.processor.process(&items).await;

    Ok(Json(AnalyzeResponse { results }))
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(rejection.body_text())
    }
}
