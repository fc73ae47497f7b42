//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::config::LoggingConfig;
use crate::models::InputItem;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Maximum characters of user text echoed into debug logs
pub const MAX_LOGGED_TEXT: usize = 80;

/// Initialize logging system
///
/// Installs a console sink and an append-only file sink sharing one filter.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log filter: {}", config.level))?;

    let log_file = open_log_file(Path::new(&config.file))?;
    let file_writer = Mutex::new(log_file);

    let layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = if config.format == "json" {
        // JSON format logs (production environment)
        vec![
            fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .boxed(),
            fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(file_writer)
                .boxed(),
        ]
    } else {
        // Human readable format (development environment)
        vec![
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .boxed(),
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(file_writer)
                .boxed(),
        ]
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized, writing to {}", config.file);
    Ok(())
}

/// Open the log file for appending, creating it if needed
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    let total = s.chars().count();
    if total > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}... ({} chars truncated)", head, total - max_chars)
    } else {
        s.to_string()
    }
}

/// Create a compact summary of an analyze batch for logging
pub fn create_batch_log_summary(items: &[InputItem]) -> serde_json::Value {
    let with_text = items.iter().filter(|item| item.text().is_some()).count();
    let with_url = items.iter().filter(|item| item.url().is_some()).count();
    let empty = items.iter().filter(|item| item.is_empty()).count();

    serde_json::json!({
        "items": items.len(),
        "with_text": with_text,
        "with_url": with_url,
        "empty": empty,
    })
}
