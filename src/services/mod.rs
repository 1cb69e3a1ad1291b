//! Service layer for the blog client.
//!
//! This module contains the logic that sits between the transport and the
//! callers:
//! - Payload normalization (`Normalizer`)
//! - Client-side search (`SearchQuery`, `Facets`)
//! - Page selections (`catalog`)

pub mod catalog;
pub mod normalizer;
pub mod search;

pub use catalog::{HomeLayout, group_by_category, home_layout, related_articles};
pub use normalizer::Normalizer;
pub use search::{Facets, SearchQuery, SortBy};
