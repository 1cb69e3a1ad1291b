// src/models/mod.rs

//! Domain models for the blog client.
//!
//! Canonical records, their unvalidated wire counterparts, and configuration.

mod article;
mod category;
mod config;
pub mod raw;

// Re-export all public types
pub use article::{Article, ArticleDraft, ArticlePayload, SeoData};
pub use category::{Category, CategoryDraft, CategoryWithArticles};
pub use config::{ApiConfig, CacheConfig, Config, ContentConfig, RetryConfig};

use serde::Deserialize;

/// Response body of a successful admin write.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WriteOutcome {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<raw::RawId>,
}

impl WriteOutcome {
    /// Id assigned by the server, rendered as a string.
    pub fn id(&self) -> Option<String> {
        self.id.as_ref().map(raw::RawId::render)
    }
}
