//! Canonical article record and its write-side shapes.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::normalizer::join_tags;

/// An article after normalization.
///
/// Every downstream consumer works with this shape; raw API fields such as
/// `is_published` are resolved once and not carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub author: String,
    /// Raw markdown or HTML
    pub content: String,
    /// Summary exactly as the API sent it
    pub summary: Option<String>,
    /// Display excerpt (`summary`, then `excerpt`)
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,
    /// Resolved display image
    pub image: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Display date, e.g. "Jan 5, 2024"
    pub date: String,
    /// e.g. "3 min read"
    pub read_time: String,
    pub seo: Option<SeoData>,
}

impl Article {
    /// Whether any tag equals `name`, ignoring ASCII case.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.eq_ignore_ascii_case(name))
    }
}

/// Structured SEO metadata edited in the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_image: Option<String>,
}

/// Article fields submitted by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub seo: Option<SeoData>,
}

impl ArticleDraft {
    /// Build the wire payload for create/update requests.
    pub fn to_payload(&self) -> Result<ArticlePayload> {
        let seo = self.seo.as_ref().map(serde_json::to_string).transpose()?;
        Ok(ArticlePayload {
            slug: self.slug.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            content: self.content.clone(),
            summary: self.summary.clone(),
            tags: join_tags(&self.tags),
            cover_image: self
                .cover_image
                .clone()
                .filter(|image| !image.trim().is_empty()),
            is_published: u8::from(self.is_published),
            seo,
        })
    }
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self {
            slug: article.slug.clone(),
            title: article.title.clone(),
            author: article.author.clone(),
            content: article.content.clone(),
            summary: article.summary.clone().unwrap_or_default(),
            tags: article.tags.clone(),
            cover_image: article.cover_image.clone(),
            is_published: article.published,
            seo: article.seo.clone(),
        }
    }
}

/// Article write body as the worker expects it.
///
/// Tags travel comma-joined and `seo` travels as a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticlePayload {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub summary: String,
    pub tags: String,
    pub cover_image: Option<String>,
    pub is_published: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> ArticleDraft {
        ArticleDraft {
            slug: "hello-rust".into(),
            title: "Hello Rust".into(),
            author: "Ada".into(),
            content: "# Hi".into(),
            summary: "Intro".into(),
            tags: vec!["rust".into(), "async".into()],
            cover_image: Some("   ".into()),
            is_published: true,
            seo: Some(SeoData {
                title: Some("Hello".into()),
                ..SeoData::default()
            }),
        }
    }

    #[test]
    fn test_payload_joins_tags_and_flags() {
        let payload = sample_draft().to_payload().unwrap();
        assert_eq!(payload.tags, "rust, async");
        assert_eq!(payload.is_published, 1);
        assert_eq!(payload.cover_image, None);
    }

    #[test]
    fn test_payload_double_encodes_seo() {
        let payload = sample_draft().to_payload().unwrap();
        let body = serde_json::to_value(&payload).unwrap();

        let inner = body["seo"].as_str().expect("seo must be a string");
        let decoded: SeoData = serde_json::from_str(inner).unwrap();
        assert_eq!(decoded.title.as_deref(), Some("Hello"));
        assert!(body["cover_image"].is_null());
    }

    #[test]
    fn test_payload_omits_missing_seo() {
        let mut draft = sample_draft();
        draft.seo = None;
        draft.is_published = false;
        let body = serde_json::to_value(draft.to_payload().unwrap()).unwrap();
        assert!(body.get("seo").is_none());
        assert_eq!(body["is_published"], 0);
    }
}
