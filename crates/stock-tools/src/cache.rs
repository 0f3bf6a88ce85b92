//! Caching layer for daily bar retrieval

use cached::{Cached, TimedSizedCache};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::api::DateRange;

/// Cache key for a bar request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarCacheKey {
    /// Standard stock code
    pub code: String,
    pub range: DateRange,
}

impl BarCacheKey {
    pub fn new(code: impl Into<String>, range: DateRange) -> Self {
        Self {
            code: code.into(),
            range,
        }
    }
}

/// Thread-safe bar cache with TTL and capacity eviction
///
/// Clones share the same storage.
#[derive(Clone)]
pub struct BarCache {
    cache: Arc<RwLock<TimedSizedCache<BarCacheKey, Arc<Vec<Value>>>>>,
}

impl BarCache {
    /// Create a cache holding at most `capacity` entries for `ttl` each
    ///
    /// `capacity` must be non-zero; `StockConfig::validate` enforces this.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedSizedCache::with_size_and_lifespan(
                capacity, ttl,
            ))),
        }
    }

    pub async fn get(&self, key: &BarCacheKey) -> Option<Arc<Vec<Value>>> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    pub async fn insert(&self, key: BarCacheKey, records: Arc<Vec<Value>>) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, records);
    }

    /// Get cached records or fetch and store them
    ///
    /// Fetch errors are returned as-is and nothing is cached. An empty result
    /// is returned but not cached, so the next call asks the provider again.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: BarCacheKey,
        fetcher: F,
    ) -> Result<Arc<Vec<Value>>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<Value>, E>>,
    {
        if let Some(records) = self.get(&key).await {
            tracing::debug!(code = %key.code, "Bar cache hit");
            return Ok(records);
        }

        tracing::debug!(code = %key.code, "Bar cache miss");

        let records = Arc::new(fetcher().await?);
        if records.is_empty() {
            tracing::debug!(code = %key.code, "Empty bar response not cached");
        } else {
            self.insert(key, Arc::clone(&records)).await;
        }

        Ok(records)
    }

    pub async fn invalidate(&self, key: &BarCacheKey) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_remove(key);
    }

    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
