use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::client::IdeasSource;
use crate::error::ListingError;
use crate::models::PageState;
use crate::models::ideas::IdeasPage;

/// Cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a fetched page counts as fresh.
    pub list_ttl: Duration,
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_ttl: Duration::from_secs(60), // 1 minute
            max_capacity: 100,
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            list_ttl: parse_duration_secs("CACHE_TTL_IDEAS", 60),
            max_capacity: std::env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}

/// Cache key generators
pub mod keys {
    use crate::models::PageState;

    /// Generate a readable key for an idea listing, used in logs.
    pub fn idea_list(state: &PageState) -> String {
        format!(
            "ideas:list:{}:{}:{}",
            state.page,
            state.size,
            state.sort.as_param()
        )
    }
}

/// Wraps a source so identical `(page, size, sort)` requests share one
/// upstream call while the result is fresh.
///
/// Concurrent misses on the same key wait for a single fetch. Failures are
/// handed to every waiter but never stored.
pub struct CachedSource<S> {
    inner: S,
    cache: Cache<PageState, Arc<IdeasPage>>,
}

impl<S: IdeasSource> CachedSource<S> {
    pub fn new(inner: S, config: CacheConfig) -> Self {
        let cache = Cache::builder()
            .time_to_live(config.list_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Like [`IdeasSource::fetch_page`] but without copying the cached page.
    pub async fn fetch_shared(&self, state: &PageState) -> Result<Arc<IdeasPage>, ListingError> {
        if let Some(hit) = self.cache.get(state).await {
            debug!("Cache hit for {}", keys::idea_list(state));
            return Ok(hit);
        }

        self.cache
            .try_get_with(*state, async {
                debug!("Cache miss for {}", keys::idea_list(state));
                self.inner.fetch_page(state).await.map(Arc::new)
            })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Drop the cached page for `state`, if any.
    pub async fn invalidate(&self, state: &PageState) {
        self.cache.invalidate(state).await;
    }

    /// Drop every cached page, forcing the next request upstream.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl<S: IdeasSource> IdeasSource for CachedSource<S> {
    async fn fetch_page(&self, state: &PageState) -> Result<IdeasPage, ListingError> {
        self.fetch_shared(state).await.map(|page| (*page).clone())
    }
}
