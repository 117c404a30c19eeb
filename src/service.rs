//! Cache Service
//!
//! Owns the process-wide cache instance together with its sweep task.
//! Construct one at startup and hand [`CacheService::cache`] to consumers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::tasks::spawn_sweep_task;

/// Shared handle to the response cache.
///
/// One coarse lock guards entries, eviction order and the tag index together.
pub type SharedCache = Arc<RwLock<ResponseCache>>;

/// Running cache plus the background sweep that reclaims expired entries.
#[derive(Debug)]
pub struct CacheService {
    cache: SharedCache,
    sweeper: JoinHandle<()>,
}

impl CacheService {
    /// Builds the cache from configuration and starts the sweep.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &Config) -> Self {
        let cache = ResponseCache::with_default_ttl(
            config.max_entries,
            Duration::from_secs(config.default_ttl),
        );
        Self::with_cache(cache, Duration::from_secs(config.sweep_interval))
    }

    /// Wraps an existing cache and starts sweeping it every `sweep_interval`.
    pub fn with_cache(cache: ResponseCache, sweep_interval: Duration) -> Self {
        let cache = Arc::new(RwLock::new(cache));
        let sweeper = spawn_sweep_task(cache.clone(), sweep_interval);
        Self { cache, sweeper }
    }

    /// Returns a handle to the shared cache.
    pub fn cache(&self) -> SharedCache {
        self.cache.clone()
    }

    /// Stops the sweep and clears the cache.
    ///
    /// Consumes the service; other `SharedCache` handles stay valid but empty.
    pub async fn destroy(self) {
        self.sweeper.abort();
        let removed = self.cache.write().await.clear();
        info!("Cache destroyed, {} entries dropped", removed);
    }
}
