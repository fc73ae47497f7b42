//! Sentiment API Server
//!
//! HTTP service that labels raw text and Reddit submissions as positive,
//! negative or neutral

use anyhow::{Context, Result};
use sentiment_api::utils::logging::init_logging;
use sentiment_api::{create_router, version_info, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Refuse to start without Reddit credentials
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());

    let app = create_router(settings.clone())?;

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Sentiment API server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Analyze endpoint: http://{}/analyze", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
