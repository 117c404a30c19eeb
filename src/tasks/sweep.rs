//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::service::SharedCache;

/// Shortest cadence the sweep runs at.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns a background task that periodically purges expired entries.
///
/// The task is a single loop that sleeps for `interval` and then takes the
/// write lock for one `purge_expired` call, so sweeps never overlap however
/// slow one of them is. The cadence is unrelated to individual entry TTLs.
/// Intervals below [`MIN_SWEEP_INTERVAL`] are raised to it.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it to stop future sweeps.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ResponseCache::new(1000)));
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweep_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    let interval = sweep_interval(interval);
    tokio::spawn(async move {
        info!("Starting expiry sweep with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.purge_expired();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "Expiry sweep: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

fn sweep_interval(requested: Duration) -> Duration {
    if requested < MIN_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is below {:?}, using the minimum",
            requested, MIN_SWEEP_INTERVAL
        );
        return MIN_SWEEP_INTERVAL;
    }
    requested
}
