//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check eviction, tagging and bookkeeping invariants over
//! random operation sequences.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

use crate::cache::{ResponseCache, SetOptions};

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 100;

// == Strategies ==
/// Generates cache keys shaped like request fingerprints
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9/_]{1,24}".prop_map(|s| format!("GET:/{}", s))
}

fn payload_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,64}".prop_map(|s| json!(s)),
        (any::<u32>(), "[a-z]{1,12}").prop_map(|(n, s)| json!({"id": n, "name": s})),
    ]
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["donations", "beneficiaries", "scholarships", "meetings"])
        .prop_map(String::from)
}

fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(tag_strategy(), 0..3)
}

/// A cache operation for sequence testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set {
        key: String,
        payload: Value,
        tags: Vec<String>,
    },
    Get {
        key: String,
    },
    Delete {
        key: String,
    },
    Invalidate {
        tag: String,
    },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), payload_strategy(), tags_strategy())
            .prop_map(|(key, payload, tags)| CacheOp::Set { key, payload, tags }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => tag_strategy().prop_map(|tag| CacheOp::Invalidate { tag }),
    ]
}

/// Unique keys in generation order
fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits and misses counted by the cache match what the caller observed,
    // and the entry gauge matches `len()`.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = ResponseCache::new(TEST_MAX_SIZE);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, payload, tags } => {
                    cache.set(key, payload, SetOptions::new().with_tags(tags));
                }
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                }
                CacheOp::Invalidate { tag } => {
                    cache.invalidate_by_tag(&tag);
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "Total entries mismatch");
        prop_assert_eq!(stats.total_tags, cache.tag_count(), "Total tags mismatch");
    }

    // The cache agrees with a simple model map under arbitrary operation
    // sequences (capacity large enough that nothing is evicted).
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut cache = ResponseCache::new(TEST_MAX_SIZE * 10);
        let mut model: HashMap<String, (Value, Vec<String>)> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, payload, tags } => {
                    cache.set(key.clone(), payload.clone(), SetOptions::new().with_tags(tags.clone()));
                    model.insert(key, (payload, tags));
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).map(|(payload, _)| payload.clone());
                    prop_assert_eq!(cache.get(&key), expected);
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(cache.delete(&key), model.remove(&key).is_some());
                }
                CacheOp::Invalidate { tag } => {
                    let before = model.len();
                    model.retain(|_, (_, tags)| !tags.contains(&tag));
                    prop_assert_eq!(cache.invalidate_by_tag(&tag), before - model.len());
                    prop_assert!(!cache.has_tag(&tag));
                }
            }
        }

        prop_assert_eq!(cache.len(), model.len());
        for (key, (payload, _)) in &model {
            prop_assert_eq!(cache.get(key), Some(payload.clone()));
        }
    }

    // The number of entries never exceeds the configured maximum.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), payload_strategy()), 1..200)
    ) {
        let max_size = 25;
        let mut cache = ResponseCache::new(max_size);

        for (key, payload) in entries {
            cache.set(key, payload, SetOptions::default());
            prop_assert!(
                cache.len() <= max_size,
                "Cache size {} exceeds max {}",
                cache.len(),
                max_size
            );
        }
    }

    // Inserting N+1 distinct keys into a cache of size N evicts exactly the
    // first one, even if it was read in between.
    #[test]
    fn prop_fifo_eviction_order(
        keys in prop::collection::vec(key_strategy(), 2..12),
        reads in prop::collection::vec(0usize..12, 0..20),
        new_key in key_strategy(),
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&new_key));

        let mut cache = ResponseCache::new(keys.len());
        for key in &keys {
            cache.set(key.clone(), json!(key), SetOptions::default());
        }

        // Reads must not influence eviction
        for index in reads {
            let _ = cache.get(&keys[index % keys.len()]);
        }

        cache.set(new_key.clone(), json!("new"), SetOptions::default());

        prop_assert_eq!(cache.len(), keys.len());
        prop_assert!(cache.get(&keys[0]).is_none(), "Oldest key should have been evicted");
        prop_assert!(cache.get(&new_key).is_some());
        for key in keys.iter().skip(1) {
            prop_assert!(cache.get(key).is_some(), "Key '{}' should still exist", key);
        }
    }

    // A second `set` replaces the key's tags instead of merging them.
    #[test]
    fn prop_set_replaces_tags(
        key in key_strategy(),
        first in tags_strategy(),
        second in tags_strategy(),
    ) {
        let mut cache = ResponseCache::new(TEST_MAX_SIZE);
        cache.set(key.clone(), json!(1), SetOptions::new().with_tags(first.clone()));
        cache.set(key.clone(), json!(2), SetOptions::new().with_tags(second.clone()));

        for tag in first.iter().filter(|t| !second.contains(*t)) {
            prop_assert!(!cache.keys_for_tag(tag).contains(&key));
        }
        for tag in &second {
            prop_assert_eq!(cache.keys_for_tag(tag), vec![key.clone()]);
        }
        prop_assert_eq!(cache.get(&key), Some(json!(2)));
    }

    // After `clear` every key is absent and every tag unknown.
    #[test]
    fn prop_clear_completeness(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = ResponseCache::new(TEST_MAX_SIZE);
        let mut keys = Vec::new();
        let mut tags = Vec::new();

        for op in ops {
            match op {
                CacheOp::Set { key, payload, tags: entry_tags } => {
                    keys.push(key.clone());
                    tags.extend(entry_tags.iter().cloned());
                    cache.set(key, payload, SetOptions::new().with_tags(entry_tags));
                }
                CacheOp::Invalidate { tag } => {
                    cache.invalidate_by_tag(&tag);
                }
                _ => {}
            }
        }

        cache.clear();

        prop_assert!(cache.is_empty());
        prop_assert_eq!(cache.tag_count(), 0);
        for key in &keys {
            prop_assert!(cache.get(key).is_none());
        }
        for tag in &tags {
            prop_assert!(!cache.has_tag(tag));
        }
    }
}
