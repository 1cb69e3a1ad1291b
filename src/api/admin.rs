// src/api/admin.rs

//! Authenticated admin operations.
//!
//! Every request carries `Authorization: Bearer <password>`. Admin reads
//! bypass the cache; writes invalidate all of it.

use crate::cache::CachePolicy;
use crate::error::Result;
use crate::models::{Article, ArticleDraft, Category, CategoryDraft, WriteOutcome};
use crate::transport::{ApiRequest, Credential, Method, Transport};

use super::{BlogClient, envelope};

impl<T: Transport> BlogClient<T> {
    /// `GET /api/admin/articles`: drafts included.
    pub async fn admin_list_articles(&self, credential: &Credential) -> Result<Vec<Article>> {
        let request = ApiRequest::get(self.endpoints.admin_articles()).with_bearer(credential);
        let data = self.read(request, CachePolicy::AlwaysFresh).await?;
        let envelope: envelope::Articles = envelope::decode(data, "admin articles")?;
        Ok(self.normalizer.articles(&envelope.articles))
    }

    pub async fn create_article(
        &self,
        credential: &Credential,
        draft: &ArticleDraft,
    ) -> Result<WriteOutcome> {
        let request = ApiRequest::new(Method::Post, self.endpoints.admin_articles())
            .with_bearer(credential)
            .json(&draft.to_payload()?)?;
        self.write(request).await
    }

    pub async fn update_article(
        &self,
        credential: &Credential,
        id: &str,
        draft: &ArticleDraft,
    ) -> Result<WriteOutcome> {
        let request = ApiRequest::new(Method::Put, self.endpoints.admin_article(id))
            .with_bearer(credential)
            .json(&draft.to_payload()?)?;
        self.write(request).await
    }

    pub async fn delete_article(&self, credential: &Credential, id: &str) -> Result<WriteOutcome> {
        let request =
            ApiRequest::new(Method::Delete, self.endpoints.admin_article(id)).with_bearer(credential);
        self.write(request).await
    }

    /// `GET /api/admin/categories`
    pub async fn admin_list_categories(&self, credential: &Credential) -> Result<Vec<Category>> {
        let request = ApiRequest::get(self.endpoints.admin_categories()).with_bearer(credential);
        let data = self.read(request, CachePolicy::AlwaysFresh).await?;
        let envelope: envelope::Categories = envelope::decode(data, "admin categories")?;
        Ok(self.normalizer.categories(&envelope.categories))
    }

    pub async fn create_category(
        &self,
        credential: &Credential,
        draft: &CategoryDraft,
    ) -> Result<WriteOutcome> {
        let request = ApiRequest::new(Method::Post, self.endpoints.admin_categories())
            .with_bearer(credential)
            .json(draft)?;
        self.write(request).await
    }

    pub async fn update_category(
        &self,
        credential: &Credential,
        id: &str,
        draft: &CategoryDraft,
    ) -> Result<WriteOutcome> {
        let request = ApiRequest::new(Method::Put, self.endpoints.admin_category(id))
            .with_bearer(credential)
            .json(draft)?;
        self.write(request).await
    }

    pub async fn delete_category(&self, credential: &Credential, id: &str) -> Result<WriteOutcome> {
        let request = ApiRequest::new(Method::Delete, self.endpoints.admin_category(id))
            .with_bearer(credential);
        self.write(request).await
    }
}
