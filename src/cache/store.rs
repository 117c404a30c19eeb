//! Response Cache Module
//!
//! Main cache engine combining HashMap storage with FIFO eviction, TTL
//! expiration and a tag index for bulk invalidation.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::fingerprint::payload_fingerprint;
use crate::cache::{
    CacheEntry, CacheStats, InsertionOrder, SetOptions, TagIndex, DEFAULT_MAX_SIZE, DEFAULT_TTL,
};

// == Response Cache ==
/// In-memory response cache.
///
/// All operations are synchronous and infallible. The store holds no lock of
/// its own; share it behind a single `RwLock` (see [`crate::service`]).
#[derive(Debug)]
pub struct ResponseCache<V = serde_json::Value> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// First-insertion order, drives eviction
    order: InsertionOrder,
    /// Tag <-> key associations
    tags: TagIndex,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied when `SetOptions::ttl` is None
    default_ttl: Duration,
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl<V> ResponseCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries with the default
    /// 5 minute TTL.
    pub fn new(max_size: usize) -> Self {
        Self::with_default_ttl(max_size, DEFAULT_TTL)
    }

    /// Creates a cache with a custom default TTL.
    ///
    /// A `max_size` of zero is treated as one.
    pub fn with_default_ttl(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            tags: TagIndex::new(),
            stats: CacheStats::new(),
            max_size: max_size.max(1),
            default_ttl,
        }
    }

    // == Get Entry ==
    /// Looks up the live entry for `key`.
    ///
    /// An expired entry is removed on the spot and reported as absent.
    /// Lookups never change eviction order.
    pub fn get_entry(&mut self, key: &str) -> Option<&CacheEntry<V>> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key)
    }

    // == Peek ==
    /// Returns the live entry for `key` without touching stats or removing
    /// anything.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }

    // == Delete ==
    /// Removes an entry and its tag links.
    ///
    /// Returns whether an entry was actually removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Invalidate By Tag ==
    /// Removes every entry linked to `tag`, then the tag itself.
    ///
    /// Returns the number of entries removed; unknown tags remove nothing.
    pub fn invalidate_by_tag(&mut self, tag: &str) -> usize {
        let keys = self.tags.take_tag(tag);

        let mut removed = 0;
        for key in keys {
            if self.entries.remove(&key).is_some() {
                self.order.remove(&key);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!("Invalidated {} entries for tag '{}'", removed, tag);
        }
        self.stats.record_invalidations(removed);
        self.refresh_sizes();
        removed
    }

    // == Clear ==
    /// Removes all entries and tag associations.
    ///
    /// Counters are kept; returns the number of entries dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.tags.clear();
        self.refresh_sizes();
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }

        self.stats.record_expirations(count);
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_sizes(self.entries.len(), self.tags.tag_count());
        stats
    }

    /// Returns true if `key` holds an unexpired entry. Does not touch stats.
    pub fn contains_key(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }

    /// Keys currently linked to `tag`.
    pub fn keys_for_tag(&self, tag: &str) -> Vec<String> {
        self.tags.keys_for(tag)
    }

    /// Returns true if at least one stored key carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains_tag(tag)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.tag_count()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet
    /// reclaimed by a lookup or the sweep.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(key);
        self.tags.detach(key);
        self.refresh_sizes();
        Some(entry)
    }

    fn refresh_sizes(&mut self) {
        self.stats
            .set_sizes(self.entries.len(), self.tags.tag_count());
    }
}

impl<V: Clone> ResponseCache<V> {
    // == Get ==
    /// Retrieves a copy of the payload stored under `key`.
    ///
    /// Returns None if the key is unknown or its TTL has elapsed.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_entry(key).map(|entry| entry.payload.clone())
    }
}

impl<V: Serialize> ResponseCache<V> {
    // == Set ==
    /// Stores `payload` under `key`, replacing any prior entry and its tags.
    ///
    /// When the cache is full and `key` is new, the oldest inserted entry is
    /// evicted first. Overwriting a key keeps its original eviction position.
    pub fn set(&mut self, key: impl Into<String>, payload: V, options: SetOptions) {
        let key = key.into();
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_size {
            if let Some(evicted_key) = self.order.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.tags.detach(&evicted_key);
                self.stats.record_eviction();
                debug!("Evicted oldest entry '{}'", evicted_key);
            }
        }

        let ttl = options.ttl.unwrap_or(self.default_ttl);
        let fingerprint = payload_fingerprint(&payload);
        self.entries
            .insert(key.clone(), CacheEntry::new(payload, ttl, fingerprint));

        if !is_overwrite {
            self.order.record(&key);
        }
        self.tags.attach(&key, &options.tags);
        self.refresh_sizes();
    }
}
