// src/api/categories.rs

//! Public category reads.

use crate::cache::CachePolicy;
use crate::error::Result;
use crate::models::{Category, CategoryWithArticles};
use crate::services::catalog;
use crate::transport::{ApiRequest, Transport};

use super::{BlogClient, envelope};

impl<T: Transport> BlogClient<T> {
    /// `GET /api/categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let request = ApiRequest::get(self.endpoints.categories());
        let data = self.read(request, CachePolicy::Cached).await?;
        let envelope: envelope::Categories = envelope::decode(data, "categories")?;
        Ok(self.normalizer.categories(&envelope.categories))
    }

    /// `GET /api/categories/{name}`; `None` when the category does not exist.
    ///
    /// Only articles carrying the category name as a tag are kept, whatever
    /// the server matched.
    pub async fn get_category_with_articles(
        &self,
        name: &str,
    ) -> Result<Option<CategoryWithArticles>> {
        let request = ApiRequest::get(self.endpoints.category(name));
        let data = match self.read(request, CachePolicy::Cached).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                log::debug!("Category not found: {}", name);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let detail: envelope::CategoryDetail = envelope::decode(data, "category")?;
        let category = self.normalizer.category(&detail.category);
        let articles = self
            .normalizer
            .articles(&detail.articles)
            .into_iter()
            .filter(|article| category.matches(article))
            .collect();
        Ok(Some(CategoryWithArticles::new(category, articles)))
    }

    /// Categories with up to `limit` of their published articles each,
    /// largest first. Empty categories are left out.
    pub async fn list_categories_with_articles(
        &self,
        limit: usize,
    ) -> Result<Vec<CategoryWithArticles>> {
        let (categories, articles) =
            futures::try_join!(self.list_categories(), self.list_articles())?;
        Ok(catalog::group_by_category(&categories, &articles, limit))
    }
}
