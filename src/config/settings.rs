//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variables that must be present and non-empty
pub const REQUIRED_CREDENTIALS: [&str; 3] = [
    "REDDIT_CLIENT_ID",
    "REDDIT_CLIENT_SECRET",
    "REDDIT_USER_AGENT",
];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Reddit API configuration
    pub reddit: RedditConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Reddit API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// OAuth application id
    pub client_id: String,
    /// OAuth application secret
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// User-Agent sent with every Reddit request
    pub user_agent: String,
    /// Token endpoint for the client-credentials grant
    pub auth_url: String,
    /// Base URL of the authenticated API
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
    /// Append-only log file
    pub file: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    ///
    /// `new` uses the process environment; tests pass a map so they never
    /// touch global state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let missing: Vec<&str> = REQUIRED_CREDENTIALS
            .iter()
            .copied()
            .filter(|&key| lookup(key).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            anyhow::bail!(
                "Missing Reddit API credentials: {}. Check your .env file.",
                missing.join(", ")
            );
        }
        let required = |key: &str| lookup(key).unwrap_or_default();

        let settings = Self {
            server: ServerConfig {
                host: get_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_or_default("SERVER_PORT", "8000")
                    .parse()
                    .context("Invalid port number")?,
            },
            reddit: RedditConfig {
                client_id: required("REDDIT_CLIENT_ID"),
                client_secret: required("REDDIT_CLIENT_SECRET"),
                user_agent: required("REDDIT_USER_AGENT"),
                auth_url: get_or_default(
                    "REDDIT_AUTH_URL",
                    "https://www.reddit.com/api/v1/access_token",
                ),
                api_base_url: get_or_default("REDDIT_API_BASE_URL", "https://oauth.reddit.com"),
                timeout: get_or_default("REDDIT_TIMEOUT", "16")
                    .parse()
                    .context("Invalid Reddit timeout value")?,
            },
            request: RequestConfig {
                max_request_size: get_or_default("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get_or_default("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_or_default("RUST_LOG", "info"),
                format: get_or_default("LOG_FORMAT", "text"),
                file: get_or_default("LOG_FILE", "api.log"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.reddit.user_agent.contains(['\r', '\n']) {
            anyhow::bail!("Reddit user agent cannot contain line breaks");
        }

        // Validate URL format
        for (name, url) in [
            ("Reddit auth URL", &self.reddit.auth_url),
            ("Reddit API base URL", &self.reddit.api_base_url),
        ] {
            if !url.starts_with("http") {
                anyhow::bail!("Invalid {} format, should start with 'http'", name);
            }
        }

        if self.reddit.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        // Validate request size limit
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        if self.logging.file.trim().is_empty() {
            anyhow::bail!("Log file path cannot be empty");
        }

        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
