//! Category record and its write-side shape.

use serde::{Deserialize, Serialize};

use crate::models::Article;

/// A category after normalization.
///
/// `name` is the matching key against article tags (ASCII case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cover: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Category {
    /// Whether this category claims the article.
    pub fn matches(&self, article: &Article) -> bool {
        article.has_tag(&self.name)
    }
}

/// A category together with its articles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithArticles {
    pub category: Category,
    pub articles: Vec<Article>,
    pub article_count: usize,
}

impl CategoryWithArticles {
    pub fn new(category: Category, articles: Vec<Article>) -> Self {
        Self {
            article_count: articles.len(),
            category,
            articles,
        }
    }
}

/// Category fields submitted by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    #[serde(rename = "cover_image", skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}
