//! Caching layer for the station set.
//!
//! Both upstreams tolerate only gentle polling, and every request
//! pattern in the app (map, list, planner) wants the same thing: the
//! whole consolidated station set. So there is exactly one cache entry,
//! rebuilt wholesale when the TTL lapses; stations are never mutated in
//! place.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Station;
use crate::sources::{SourceError, StationSource};

/// The cached, shared station set.
pub type StationSet = Arc<Vec<Arc<Station>>>;

/// Configuration for the station cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the cached station set.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
        }
    }
}

/// A station source with a TTL cache in front.
pub struct StationCache<S> {
    source: S,
    cache: MokaCache<(), StationSet>,
}

impl<S: StationSource> StationCache<S> {
    /// Create a new cache over the given source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { source, cache }
    }

    /// Get the station set, fetching from the source when the cached
    /// copy has expired.
    pub async fn stations(&self) -> Result<StationSet, SourceError> {
        if let Some(cached) = self.cache.get(&()).await {
            return Ok(cached);
        }

        let fetched = self.source.fetch_stations().await?;
        let entry: StationSet = Arc::new(fetched.into_iter().map(Arc::new).collect());

        self.cache.insert((), entry.clone()).await;

        Ok(entry)
    }

    /// Drop the cached set so the next request refreshes.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
