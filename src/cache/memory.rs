// ABOUTME: In-memory cache implementation with LRU eviction
// ABOUTME: Bounded by a capacity; least-recently-used entries are dropped first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

use super::{CacheStats, PlannerCache};

/// In-memory cache with LRU eviction
///
/// Owned by a single component and mutated through `&mut self`; no locking.
pub struct LruPlannerCache<K: Hash + Eq, V> {
    store: LruCache<K, V>,
    stats: CacheStats,
}

impl<K: Hash + Eq, V> LruPlannerCache<K, V> {
    /// Default capacity when zero entries are requested
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache holding at most `capacity` entries
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Maximum number of entries
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.cap().get()
    }
}

impl<K, V> PlannerCache<K, V> for LruPlannerCache<K, V>
where
    K: Hash + Eq + Send,
    V: Clone + Send,
{
    fn get(&mut self, key: &K) -> Option<V> {
        let value = self.store.get(key).cloned();
        if value.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        value
    }

    fn set(&mut self, key: K, value: V) {
        if let Some((evicted_key, _)) = self.store.push(key, value) {
            // push also returns the old entry when the key was already present
            if !self.store.contains(&evicted_key) {
                self.stats.evictions += 1;
                tracing::trace!("Planner cache evicted least-recently-used entry");
            }
        }
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        self.store.pop(key)
    }

    fn clear(&mut self) {
        self.store.clear();
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let mut cache = LruPlannerCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.get(&"a"), Some(1));
        cache.set("c", 3);

        assert!(cache.get(&"b").is_none());
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"c"), Some(3));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_replacing_a_key_is_not_an_eviction() {
        let mut cache = LruPlannerCache::new(2);
        cache.set("a", 1);
        cache.set("a", 2);
        assert_eq!(cache.get(&"a"), Some(2));
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evict_and_clear() {
        let mut cache = LruPlannerCache::new(0);
        assert_eq!(cache.capacity(), 64);
        cache.set(1, "one");
        cache.set(2, "two");
        assert_eq!(cache.evict(&1), Some("one"));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
