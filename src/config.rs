//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

use crate::error::{Result, ServerError};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Upstream ===
    /// Gamma API base URL.
    #[serde(default = "default_gamma_api_url")]
    pub gamma_api_url: String,

    /// Outbound request timeout. Unset leaves the transport default (none).
    #[serde(default)]
    pub http_timeout_ms: Option<u64>,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Expose Prometheus metrics at `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

/// Default Gamma API base URL.
pub const DEFAULT_GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

fn default_gamma_api_url() -> String {
    DEFAULT_GAMMA_API_URL.to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gamma_api_url: default_gamma_api_url(),
            http_timeout_ms: None,
            port: default_port(),
            metrics_enabled: default_true(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Validate, converting a failure into a [`ServerError`].
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate().map_err(ServerError::InvalidConfig)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let url = Url::parse(&self.gamma_api_url)
            .map_err(|e| format!("GAMMA_API_URL is not a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err("GAMMA_API_URL must use http or https".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.http_timeout_ms == Some(0) {
            return Err("HTTP_TIMEOUT_MS must be positive when set".to_string());
        }

        Ok(())
    }

    /// Outbound request timeout, if configured.
    pub fn http_timeout(&self) -> Option<std::time::Duration> {
        self.http_timeout_ms.map(std::time::Duration::from_millis)
    }
}
