// src/api/articles.rs

//! Public article reads.

use crate::cache::CachePolicy;
use crate::error::Result;
use crate::models::Article;
use crate::services::{HomeLayout, SearchQuery, catalog};
use crate::transport::{ApiRequest, Transport};

use super::{BlogClient, envelope};

impl<T: Transport> BlogClient<T> {
    /// `GET /api/articles`: every published article, normalized.
    pub async fn list_articles(&self) -> Result<Vec<Article>> {
        let request = ApiRequest::get(self.endpoints.articles());
        let data = self.read(request, CachePolicy::Cached).await?;
        let envelope: envelope::Articles = envelope::decode(data, "articles")?;
        Ok(self.normalizer.articles(&envelope.articles))
    }

    /// `GET /api/articles/{slug}`; `None` when the article does not exist.
    pub async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let request = ApiRequest::get(self.endpoints.article(slug));
        let data = match self.read(request, CachePolicy::Cached).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                log::debug!("Article not found: {}", slug);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let detail: envelope::ArticleDetail = envelope::decode(data, "article")?;
        Ok(detail.article.map(|raw| self.normalizer.article(&raw)))
    }

    /// Slugs of every published article.
    ///
    /// Falls back to the slugs of [`list_articles`](Self::list_articles) when
    /// the dedicated endpoint fails.
    pub async fn list_article_slugs(&self) -> Result<Vec<String>> {
        let request = ApiRequest::get(self.endpoints.article_slugs());
        let primary = match self.read(request, CachePolicy::Cached).await {
            Ok(data) => envelope::decode::<envelope::Slugs>(data, "slugs"),
            Err(e) => Err(e),
        };

        match primary {
            Ok(envelope) => Ok(envelope.slugs),
            Err(e) => {
                log::warn!("Slug endpoint failed ({}), deriving slugs from articles", e);
                let articles = self.list_articles().await?;
                Ok(articles
                    .into_iter()
                    .filter(|a| a.published && !a.slug.is_empty())
                    .map(|a| a.slug)
                    .collect())
            }
        }
    }

    /// Up to `limit` published articles sharing `article`'s category.
    pub async fn related_articles(&self, article: &Article, limit: usize) -> Result<Vec<Article>> {
        let articles = self.list_articles().await?;
        Ok(catalog::related_articles(&articles, article, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Home page sections built from the article list.
    pub async fn home(&self) -> Result<HomeLayout> {
        let articles = self.list_articles().await?;
        Ok(catalog::home_layout(&articles))
    }

    /// Run `query` against the article list.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>> {
        let articles = self.list_articles().await?;
        Ok(query.run(&articles).into_iter().cloned().collect())
    }
}
