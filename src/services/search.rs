// src/services/search.rs

//! Client-side article search.
//!
//! Filters an already-fetched article list; no request is issued here.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::AppError;
use crate::models::Article;
use crate::utils::contains_ignore_case;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Keep the API's order
    #[default]
    Relevance,
    /// Newest first
    Date,
    Title,
    Author,
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(SortBy::Relevance),
            "date" | "latest" => Ok(SortBy::Date),
            "title" => Ok(SortBy::Title),
            "author" => Ok(SortBy::Author),
            other => Err(AppError::validation(format!("unknown sort order '{other}'"))),
        }
    }
}

/// Search criteria; every part is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    /// Exact category name
    pub category: Option<String>,
    /// All of these tags must be present
    pub tags: Vec<String>,
    pub sort: SortBy,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn matches(&self, article: &Article, needle: &str) -> bool {
        if !article.published {
            return false;
        }
        if !needle.is_empty() && !matches_text(article, needle) {
            return false;
        }
        if let Some(category) = &self.category {
            if &article.category != category {
                return false;
            }
        }
        self.tags.iter().all(|tag| article.tags.contains(tag))
    }

    /// Published articles matching the query, in the requested order.
    pub fn run<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        let needle = self.text.trim().to_lowercase();
        let mut hits: Vec<&Article> = articles
            .iter()
            .filter(|article| self.matches(article, &needle))
            .collect();

        match self.sort {
            SortBy::Relevance => {}
            SortBy::Date => hits.sort_by(|a, b| compare_newest_first(a, b)),
            SortBy::Title => {
                hits.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            }
            SortBy::Author => {
                hits.sort_by(|a, b| a.author.to_lowercase().cmp(&b.author.to_lowercase()))
            }
        }
        hits
    }
}

fn matches_text(article: &Article, needle: &str) -> bool {
    contains_ignore_case(&article.title, needle)
        || contains_ignore_case(&article.excerpt, needle)
        || contains_ignore_case(&article.content, needle)
        || contains_ignore_case(&article.author, needle)
        || contains_ignore_case(&article.category, needle)
        || article.tags.iter().any(|tag| contains_ignore_case(tag, needle))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::default()))
        })
        .ok()
}

/// Newest first; undated articles sink to the end.
fn compare_newest_first(a: &Article, b: &Article) -> Ordering {
    let a = a.created_at.as_deref().and_then(parse_timestamp);
    let b = b.created_at.as_deref().and_then(parse_timestamp);
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter options derived from a list of articles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl Facets {
    /// Sorted unique categories and tags of published articles.
    pub fn from_articles(articles: &[Article]) -> Self {
        let published = articles.iter().filter(|a| a.published);
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();
        for article in published {
            categories.insert(article.category.clone());
            tags.extend(article.tags.iter().cloned());
        }
        Self {
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
        }
    }
}
