// src/services/catalog.rs

//! Page-level selections over normalized articles and categories.

use std::collections::HashSet;

use crate::models::{Article, Category, CategoryWithArticles};
use crate::utils::contains_ignore_case;

/// Articles per section on the home page.
pub const HOME_SECTION_SIZE: usize = 6;

/// Articles shown per category on the categories page.
pub const CATEGORY_PREVIEW_SIZE: usize = 6;

/// Related articles shown below an article.
pub const RELATED_SIZE: usize = 3;

/// Home page sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeLayout {
    pub featured: Option<Article>,
    pub latest: Vec<Article>,
    pub popular: Vec<Article>,
}

/// Featured article (first flagged, else first published), latest
/// excluding it, and popular.
pub fn home_layout(articles: &[Article]) -> HomeLayout {
    let published: Vec<&Article> = articles.iter().filter(|a| a.published).collect();
    let featured = published
        .iter()
        .find(|a| a.featured)
        .or_else(|| published.first())
        .map(|a| (*a).clone());

    let latest = published
        .iter()
        .filter(|a| featured.as_ref().is_none_or(|f| f.id != a.id))
        .take(HOME_SECTION_SIZE)
        .map(|a| (*a).clone())
        .collect();
    let popular = published
        .iter()
        .take(HOME_SECTION_SIZE)
        .map(|a| (*a).clone())
        .collect();

    HomeLayout {
        featured,
        latest,
        popular,
    }
}

/// Published articles in the same category (ignoring ASCII case),
/// excluding `current`.
pub fn related_articles<'a>(
    articles: &'a [Article],
    current: &Article,
    limit: usize,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| {
            a.published && a.id != current.id && a.category.eq_ignore_ascii_case(&current.category)
        })
        .take(limit)
        .collect()
}

/// Categories with up to `limit` published matching articles each.
///
/// Categories without articles are dropped; the rest are ordered by article
/// count, largest first, ties keeping the input order.
pub fn group_by_category(
    categories: &[Category],
    articles: &[Article],
    limit: usize,
) -> Vec<CategoryWithArticles> {
    let mut grouped: Vec<CategoryWithArticles> = categories
        .iter()
        .map(|category| {
            let matching = articles
                .iter()
                .filter(|a| a.published && category.matches(a))
                .take(limit)
                .cloned()
                .collect();
            CategoryWithArticles::new(category.clone(), matching)
        })
        .filter(|group| group.article_count > 0)
        .collect();

    grouped.sort_by(|a, b| b.article_count.cmp(&a.article_count));
    grouped
}

/// Groups whose name or description contains `term` (case-insensitive).
pub fn filter_categories<'a>(
    groups: &'a [CategoryWithArticles],
    term: &str,
) -> Vec<&'a CategoryWithArticles> {
    let needle = term.trim().to_lowercase();
    groups
        .iter()
        .filter(|group| {
            needle.is_empty()
                || contains_ignore_case(&group.category.name, &needle)
                || contains_ignore_case(&group.category.description, &needle)
        })
        .collect()
}

/// First `limit` distinct tags in order of appearance.
pub fn trending_tags(articles: &[Article], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .flat_map(|a| a.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .take(limit)
        .cloned()
        .collect()
}
