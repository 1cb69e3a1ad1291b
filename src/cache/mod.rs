//! In-memory TTL cache for decoded read responses.
//!
//! ## Entry lifecycle
//!
//! ```text
//! absent ──store──▶ fresh ──ttl elapses──▶ stale ──lookup──▶ absent
//!   ▲                                                         │
//!   └──────────────────── invalidate_all ◀────────────────────┘
//! ```
//!
//! Stale entries are purged lazily by the lookup that finds them; there is
//! no background sweep and no size bound.

mod clock;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::transport::{AUTHORIZATION, ApiRequest};

pub use clock::{Clock, ManualClock, SystemClock};

/// Whether an endpoint's reads may be served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Cached,
    AlwaysFresh,
}

/// Identity of a read request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Digest of method, full URL and non-credential headers.
    ///
    /// Header order does not matter. The `Authorization` value is left out.
    pub fn for_request(request: &ApiRequest) -> Self {
        let mut headers: Vec<(String, &str)> = request
            .headers
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION))
            .map(|(name, value)| (name.to_ascii_lowercase(), value.as_str()))
            .collect();
        headers.sort();

        let mut hasher = Sha256::new();
        hasher.update(request.method.as_str());
        hasher.update(b"\n");
        hasher.update(&request.url);
        for (name, value) in headers {
            hasher.update(b"\n");
            hasher.update(name);
            hasher.update(b":");
            hasher.update(value);
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    stored_at: Instant,
}

/// Process-wide response cache, shared by reference.
pub struct ResponseCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cache backed by the system clock.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        // A panic mid-insert cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fresh payload for `key`, purging it if it has gone stale.
    pub fn lookup(&self, key: &CacheKey) -> Option<Value> {
        let now = self.clock.now();
        let mut entries = self.entries();

        let entry = entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) >= self.ttl {
            entries.remove(key);
            return None;
        }
        Some(entry.data.clone())
    }

    /// Store a payload; a later write for the same key wins.
    pub fn store(&self, key: CacheKey, data: Value) {
        let entry = CacheEntry {
            data,
            stored_at: self.clock.now(),
        };
        self.entries().insert(key, entry);
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        let mut entries = self.entries();
        let dropped = entries.len();
        entries.clear();
        log::info!("Response cache cleared ({} entries)", dropped);
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
