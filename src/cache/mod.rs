//! Cache Module
//!
//! Provides in-memory response caching with TTL expiration, tag-based
//! invalidation and FIFO eviction.

mod entry;
mod fifo;
pub mod fingerprint;
mod options;
mod stats;
mod store;
mod tags;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use entry::CacheEntry;
pub use fifo::InsertionOrder;
pub use options::SetOptions;
pub use stats::CacheStats;
pub use store::ResponseCache;
pub use tags::TagIndex;

// == Public Constants ==
/// Default maximum number of entries
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Default entry TTL (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default sweep cadence (5 minutes), independent of entry TTLs
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);
