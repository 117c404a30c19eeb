//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cached response with its expiry metadata.
///
/// Entries are never mutated once stored; a `set` on the same key replaces
/// the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub payload: V,
    /// Insertion instant (tokio clock, so paused-time tests can advance it)
    pub created_at: Instant,
    /// Time-to-live, fixed at insertion
    pub ttl: Duration,
    /// Content hash of the payload, used for ETag headers only
    pub fingerprint: String,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current instant.
    pub fn new(payload: V, ttl: Duration, fingerprint: String) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
            ttl,
            fingerprint,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is readable only while
    /// `now - created_at < ttl`, so it is expired as soon as the elapsed time
    /// reaches the TTL.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied instant.
    ///
    /// The sweep uses this to evaluate every entry against one `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self) -> Duration {
        let elapsed = Instant::now().saturating_duration_since(self.created_at);
        self.ttl.saturating_sub(elapsed)
    }

    /// Returns the remaining lifetime in whole seconds, for `max-age` and API responses.
    pub fn ttl_remaining_secs(&self) -> u64 {
        self.ttl_remaining().as_secs()
    }
}
