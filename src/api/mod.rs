// src/api/mod.rs

//! Content API client.
//!
//! `BlogClient` ties the pieces together: every call goes through the
//! retrying transport, cacheable reads consult the shared [`ResponseCache`]
//! first, and payloads leave through the [`Normalizer`]. Operations are split
//! by resource:
//! - `articles`: public article reads
//! - `categories`: public category reads
//! - `admin`: authenticated reads and writes

mod admin;
mod articles;
mod categories;
mod envelope;

use std::sync::Arc;

use serde_json::Value;

use crate::cache::{CacheKey, CachePolicy, ResponseCache};
use crate::error::Result;
use crate::models::{Config, WriteOutcome};
use crate::services::Normalizer;
use crate::transport::{ApiRequest, HttpTransport, RetryPolicy, Transport};
use crate::utils::Endpoints;

pub use crate::transport::Credential;

/// Client for the blog worker's JSON API.
pub struct BlogClient<T: Transport = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
    retry: RetryPolicy,
    cache: Arc<ResponseCache>,
    cache_enabled: bool,
    normalizer: Normalizer,
}

impl BlogClient<HttpTransport> {
    /// Build a client with a reqwest transport and a fresh system-clock cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(&config.api)?;
        let cache = Arc::new(ResponseCache::with_ttl(config.cache.ttl()));
        Self::new(transport, config, cache)
    }
}

impl<T: Transport> BlogClient<T> {
    /// Build a client over any transport, sharing `cache` with other clients.
    pub fn new(transport: T, config: &Config, cache: Arc<ResponseCache>) -> Result<Self> {
        Ok(Self {
            transport,
            endpoints: Endpoints::new(&config.api.base_url)?,
            retry: config.retry.policy(),
            cache,
            cache_enabled: config.cache.enabled,
            normalizer: Normalizer::new(&config.content),
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }

    /// `GET /api/health`; `true` only when the worker reports `OK`.
    ///
    /// Never fails: any error is logged and reported as unhealthy.
    pub async fn health_check(&self) -> bool {
        let request = ApiRequest::get(self.endpoints.health());
        let status = match self.read(request, CachePolicy::AlwaysFresh).await {
            Ok(data) => envelope::decode::<envelope::Health>(data, "health"),
            Err(e) => Err(e),
        };

        match status {
            Ok(health) => health.status.as_deref() == Some("OK"),
            Err(e) => {
                log::warn!("Health check failed: {}", e);
                false
            }
        }
    }

    /// Perform a read, serving it from the cache when allowed.
    ///
    /// Only `200` bodies are stored.
    async fn read(&self, request: ApiRequest, policy: CachePolicy) -> Result<Value> {
        let key = (self.cache_enabled
            && policy == CachePolicy::Cached
            && request.method.is_read())
        .then(|| CacheKey::for_request(&request));

        if let Some(key) = &key {
            if let Some(data) = self.cache.lookup(key) {
                log::debug!("Cache hit: {}", request.url);
                return Ok(data);
            }
            log::debug!("Cache miss: {}", request.url);
        }

        let response = self.retry.execute(&self.transport, &request).await?;
        let data: Value = response.json()?;

        if let Some(key) = key.filter(|_| response.status == 200) {
            self.cache.store(key, data.clone());
        }
        Ok(data)
    }

    /// Perform a write and invalidate the cache, whatever the outcome.
    async fn write(&self, request: ApiRequest) -> Result<WriteOutcome> {
        let result = self.retry.execute(&self.transport, &request).await;
        self.cache.invalidate_all();

        let response = result?;
        log::info!("{} {} -> {}", request.method, request.url, response.status);
        let outcome = response
            .json::<Option<WriteOutcome>>()
            .unwrap_or_else(|e| {
                log::warn!("Unreadable write response from {}: {}", request.url, e);
                None
            });
        Ok(outcome.unwrap_or_default())
    }
}

impl<T: Transport> std::fmt::Debug for BlogClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogClient")
            .field("endpoints", &self.endpoints)
            .field("retry", &self.retry)
            .field("cache", &self.cache)
            .field("cache_enabled", &self.cache_enabled)
            .finish_non_exhaustive()
    }
}
