//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod analyze;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{BatchProcessor, ContentFetcher, RedditClient, SentimentScorer, VaderScorer};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::{extract::DefaultBodyLimit, middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub processor: BatchProcessor,
}

impl AppState {
    /// Wire the production collaborators: VADER and the Reddit API client
    pub fn new(settings: Settings) -> Result<Self> {
        let scorer: Arc<dyn SentimentScorer> = Arc::new(VaderScorer::new());
        let fetcher: Arc<dyn ContentFetcher> = Arc::new(
            RedditClient::new(settings.reddit.clone()).context("Failed to create Reddit client")?,
        );

        Ok(Self::with_collaborators(settings, scorer, fetcher))
    }

    /// Build state around caller-supplied collaborators
    pub fn with_collaborators(
        settings: Settings,
        scorer: Arc<dyn SentimentScorer>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self {
            settings,
            processor: BatchProcessor::new(scorer, fetcher),
        }
    }
}

/// Create application router with the production collaborators
pub fn create_router(settings: Settings) -> Result<Router> {
    let state = AppState::new(settings)?;
    Ok(build_router(Arc::new(state)))
}

/// Assemble routes and middleware around an existing state
pub fn build_router(state: Arc<AppState>) -> Router {
    let max_request_size = state.settings.request.max_request_size;
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_request_size));

    let router = Router::new()
        .route("/analyze", post(analyze::handle_analyze))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(state.clone())
        // Extractors otherwise stop at axum's own 2 MiB default
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(middleware_stack);

    match cors_layer(&state.settings) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(settings: &Settings) -> Option<CorsLayer> {
    if !settings.security.cors_enabled {
        return None;
    }

    let origins = &settings.security.allowed_origins;
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
