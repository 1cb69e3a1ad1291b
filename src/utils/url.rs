// src/utils/url.rs

//! Endpoint URL construction.

use url::Url;

use crate::error::{AppError, Result};

/// Builds API URLs under a base URL.
///
/// Path segments are percent-encoded, so a slug or category name can never
/// escape its segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "api.base_url cannot be a base: {base_url}"
            )));
        }
        Ok(Self { base })
    }

    /// `{base}/seg/seg/...`
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }

    pub fn articles(&self) -> String {
        self.url(&["api", "articles"])
    }

    pub fn article(&self, slug: &str) -> String {
        self.url(&["api", "articles", slug])
    }

    pub fn article_slugs(&self) -> String {
        self.url(&["api", "articles", "slugs"])
    }

    pub fn categories(&self) -> String {
        self.url(&["api", "categories"])
    }

    pub fn category(&self, name: &str) -> String {
        self.url(&["api", "categories", name])
    }

    pub fn admin_articles(&self) -> String {
        self.url(&["api", "admin", "articles"])
    }

    pub fn admin_article(&self, id: &str) -> String {
        self.url(&["api", "admin", "articles", id])
    }

    pub fn admin_categories(&self) -> String {
        self.url(&["api", "admin", "categories"])
    }

    pub fn admin_category(&self, id: &str) -> String {
        self.url(&["api", "admin", "categories", id])
    }

    pub fn health(&self) -> String {
        self.url(&["api", "health"])
    }
}
