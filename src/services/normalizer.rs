// src/services/normalizer.rs

//! Conversion from raw API records to canonical records.
//!
//! This is the only place where `models::raw` shapes are read. Every derived
//! field is computed from the raw input alone, so normalizing the same record
//! twice yields equal output.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::models::raw::{RawArticle, RawCategory, RawTags};
use crate::models::{Article, Category, ContentConfig, SeoData};
use crate::utils::first_non_empty;

/// Category used when an article has neither a category nor tags.
pub const DEFAULT_CATEGORY: &str = "General";

/// Raw → canonical converter.
#[derive(Debug, Clone)]
pub struct Normalizer {
    placeholder_image: String,
    chars_per_minute: usize,
}

impl Normalizer {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            placeholder_image: config.placeholder_image.clone(),
            chars_per_minute: config.chars_per_minute.max(1),
        }
    }

    /// Normalize one article.
    pub fn article(&self, raw: &RawArticle) -> Article {
        let tags = match &raw.tags {
            Some(tags) => parse_tags(tags),
            None => Vec::new(),
        };

        let category = first_non_empty([
            raw.category.as_deref(),
            tags.iter().map(String::as_str).find(|tag| !tag.trim().is_empty()),
        ])
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

        let image = first_non_empty([raw.cover_image.as_deref(), raw.image.as_deref()])
            .unwrap_or(self.placeholder_image.as_str())
            .to_string();

        let published = raw.is_published.as_ref().is_some_and(|f| f.is_one())
            || raw.published.as_ref().is_some_and(|f| f.is_true());

        let content = raw.content.clone().unwrap_or_default();
        let read_time = match first_non_empty([raw.read_time.as_deref()]) {
            Some(given) => given.to_string(),
            None => estimate_read_time(&content, self.chars_per_minute),
        };

        let date = match first_non_empty([raw.date.as_deref()]) {
            Some(given) => given.to_string(),
            None => raw
                .created_at
                .as_deref()
                .map(|ts| format_display_date(ts).unwrap_or_else(|| ts.to_string()))
                .unwrap_or_default(),
        };

        Article {
            id: raw.id.as_ref().map(|id| id.render()).unwrap_or_default(),
            slug: raw.slug.clone().unwrap_or_default(),
            title: raw.title.clone().unwrap_or_default(),
            author: raw.author.clone().unwrap_or_default(),
            excerpt: first_non_empty([raw.summary.as_deref(), raw.excerpt.as_deref()])
                .unwrap_or_default()
                .to_string(),
            summary: raw.summary.clone(),
            content,
            tags,
            category,
            image,
            cover_image: raw.cover_image.clone(),
            published,
            featured: raw.featured.as_ref().is_some_and(|f| f.is_true() || f.is_one()),
            created_at: raw.created_at.clone(),
            updated_at: raw.updated_at.clone(),
            date,
            read_time,
            seo: raw.seo.as_ref().and_then(parse_seo),
        }
    }

    /// Normalize a list of articles, preserving order.
    pub fn articles(&self, raw: &[RawArticle]) -> Vec<Article> {
        raw.iter().map(|r| self.article(r)).collect()
    }

    /// Normalize one category.
    pub fn category(&self, raw: &RawCategory) -> Category {
        Category {
            id: raw.id.as_ref().map(|id| id.render()).unwrap_or_default(),
            name: raw.name.as_deref().unwrap_or_default().trim().to_string(),
            description: raw.description.clone().unwrap_or_default(),
            cover: raw.cover.clone().filter(|c| !c.trim().is_empty()),
            created_at: raw.created_at.clone(),
            updated_at: raw.updated_at.clone(),
        }
    }

    pub fn categories(&self, raw: &[RawCategory]) -> Vec<Category> {
        raw.iter().map(|r| self.category(r)).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&ContentConfig::default())
    }
}

/// Tags from either wire form. Lists pass through untouched; strings are
/// split on commas, trimmed, and empty segments dropped.
pub fn parse_tags(raw: &RawTags) -> Vec<String> {
    match raw {
        RawTags::List(tags) => tags.clone(),
        RawTags::Joined(joined) => split_tags(joined),
        RawTags::Other(_) => Vec::new(),
    }
}

/// Split a comma-joined tag string.
pub fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Join tags for transport (`"a, b"`).
pub fn join_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `ceil(chars / chars_per_minute)` minutes, at least one.
pub fn estimate_read_time(content: &str, chars_per_minute: usize) -> String {
    let chars = content.chars().count();
    let minutes = chars.div_ceil(chars_per_minute.max(1)).max(1);
    format!("{minutes} min read")
}

/// Render an API timestamp as "Jan 5, 2024".
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
pub fn format_display_date(timestamp: &str) -> Option<String> {
    let timestamp = timestamp.trim();
    let date = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .or_else(|_| NaiveDate::parse_from_str(timestamp, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%b %-d, %Y").to_string())
}

/// SEO metadata from an object or a JSON-encoded string.
fn parse_seo(value: &Value) -> Option<SeoData> {
    match value {
        Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        Value::String(encoded) if !encoded.trim().is_empty() => {
            serde_json::from_str(encoded).ok()
        }
        _ => None,
    }
}
