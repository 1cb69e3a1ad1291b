//! Unvalidated wire shapes as the blog worker sends them.
//!
//! Fields are loosely typed on purpose: ids may be numbers or strings, tags
//! a list or a comma-joined string, and the published flag either a numeric
//! `is_published` or a boolean `published`. Nothing outside
//! `services::normalizer` should consume these types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Identifier sent as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl RawId {
    pub fn render(&self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
            RawId::Other(v) => v.to_string(),
        }
    }
}

/// Tags as a native list or a comma-joined string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    List(Vec<String>),
    Joined(String),
    /// Anything else; treated as no tags
    Other(Value),
}

/// A flag that may arrive as a number (`1`/`0`) or a boolean.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Number(i64),
    Other(Value),
}

impl RawFlag {
    /// `=== 1`: only the JSON number one.
    pub fn is_one(&self) -> bool {
        matches!(self, RawFlag::Number(1))
    }

    /// `=== true`: only the JSON boolean true.
    pub fn is_true(&self) -> bool {
        matches!(self, RawFlag::Bool(true))
    }
}

/// Text field that tolerates other scalars: numbers and booleans are
/// rendered, anything else reads as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Article record before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Option<RawTags>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_published: Option<RawFlag>,
    #[serde(default)]
    pub published: Option<RawFlag>,
    #[serde(default)]
    pub featured: Option<RawFlag>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, rename = "readTime", deserialize_with = "lenient_text")]
    pub read_time: Option<String>,
    /// Object, JSON-encoded string, or absent
    #[serde(default)]
    pub seo: Option<Value>,
}

/// Category record before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, alias = "cover_image", deserialize_with = "lenient_text")]
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
}
