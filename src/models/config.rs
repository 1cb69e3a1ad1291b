//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::transport::RetryPolicy;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Content API endpoint and HTTP client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Retry behavior for transient failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Normalization fallbacks
    #[serde(default)]
    pub content: ContentConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::validation("api.base_url must be http(s)"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.retry.max_attempts == 0 {
            return Err(AppError::validation("retry.max_attempts must be >= 1"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(AppError::validation("cache.ttl_secs must be > 0"));
        }
        if self.content.chars_per_minute == 0 {
            return Err(AppError::validation("content.chars_per_minute must be > 0"));
        }
        Ok(())
    }
}

/// Content API endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the blog worker (paths are appended to it)
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per request, including the first one
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Linear backoff unit in milliseconds
    #[serde(default = "defaults::backoff_ms")]
    pub backoff_ms: u64,
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.backoff_ms))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            backoff_ms: defaults::backoff_ms(),
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Disable to make every read go to the network
    #[serde(default = "defaults::cache_enabled")]
    pub enabled: bool,

    /// Entry lifetime in seconds
    #[serde(default = "defaults::ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::cache_enabled(),
            ttl_secs: defaults::ttl(),
        }
    }
}

/// Fallbacks used while normalizing API records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Image shown when an article has neither a cover nor an image
    #[serde(default = "defaults::placeholder_image")]
    pub placeholder_image: String,

    /// Reading speed used to estimate read time
    #[serde(default = "defaults::chars_per_minute")]
    pub chars_per_minute: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            placeholder_image: defaults::placeholder_image(),
            chars_per_minute: defaults::chars_per_minute(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://blog-worker.example.workers.dev".into()
    }
    pub fn user_agent() -> String {
        concat!("blog-client/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Retry defaults
    pub fn max_attempts() -> u32 {
        3
    }
    pub fn backoff_ms() -> u64 {
        1000
    }

    // Cache defaults
    pub fn cache_enabled() -> bool {
        true
    }
    pub fn ttl() -> u64 {
        5 * 60
    }

    // Content defaults
    pub fn placeholder_image() -> String {
        "/placeholder.svg?height=400&width=600".into()
    }
    pub fn chars_per_minute() -> usize {
        1000
    }
}
