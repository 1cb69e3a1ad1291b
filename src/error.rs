// src/error.rs

//! Unified error handling for the blog client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP 4xx response, never retried
    #[error("HTTP {status}: {body}")]
    Client { status: u16, body: String },

    /// HTTP 5xx (or otherwise unsuccessful) response
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// Connection, DNS or timeout failure
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Every attempt failed; carries the last observed cause
    #[error("All {attempts} attempts failed, last error: {last}")]
    RetriesExhausted { attempts: u32, last: Box<AppError> },

    /// Successful response with an unexpected body shape
    #[error("Unexpected payload: {0}")]
    Payload(String),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a network error for a request URL.
    pub fn network(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a payload shape error.
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether another attempt may succeed (5xx and network failures).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Network { .. })
    }

    /// HTTP status carried by this error, looking through retry exhaustion.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::RetriesExhausted { last, .. } => last.status(),
            _ => None,
        }
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Client { status: 404, .. })
    }

    /// Human-readable message reported by the server.
    ///
    /// The worker answers failures with `{"error": "..."}`; that text is
    /// returned when present, otherwise the raw body. `None` for errors that
    /// never reached the server.
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Client { body, .. } | Self::Server { body, .. } => {
                let extracted = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from));
                Some(extracted.unwrap_or_else(|| body.clone()))
            }
            Self::RetriesExhausted { last, .. } => last.server_message(),
            _ => None,
        }
    }
}
