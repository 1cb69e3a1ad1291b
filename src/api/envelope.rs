// src/api/envelope.rs

//! Response envelopes of the worker's endpoints.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::raw::{RawArticle, RawCategory};

/// `{ "articles": [...] }`
#[derive(Debug, Deserialize)]
pub(super) struct Articles {
    pub articles: Vec<RawArticle>,
}

/// `{ "article": {...} }`; the worker may answer `200` with no article.
#[derive(Debug, Deserialize)]
pub(super) struct ArticleDetail {
    #[serde(default)]
    pub article: Option<RawArticle>,
}

/// `{ "slugs": ["a", "b"] }`
#[derive(Debug, Deserialize)]
pub(super) struct Slugs {
    pub slugs: Vec<String>,
}

/// `{ "categories": [...] }`
#[derive(Debug, Deserialize)]
pub(super) struct Categories {
    pub categories: Vec<RawCategory>,
}

/// `{ "category": {...}, "articles": [...] }`
#[derive(Debug, Deserialize)]
pub(super) struct CategoryDetail {
    pub category: RawCategory,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// `{ "status": "OK" }`
#[derive(Debug, Deserialize)]
pub(super) struct Health {
    #[serde(default)]
    pub status: Option<String>,
}

/// Decode `data` into an envelope, reporting shape mismatches as
/// [`AppError::Payload`].
pub(super) fn decode<E: DeserializeOwned>(data: Value, what: &str) -> Result<E> {
    serde_json::from_value(data)
        .map_err(|e| AppError::payload(format!("unexpected {what} response: {e}")))
}
