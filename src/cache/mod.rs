// ABOUTME: Injectable cache abstraction for methodology philosophies and pace lookups
// ABOUTME: Replaces process-wide singletons with caches owned by the components that use them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planner Caches
//!
//! Caches are plain values handed to the component that needs them (the
//! methodology factory, the plan generator). Nothing here is global, so
//! independent athletes can be processed in parallel with their own caches.

/// LRU-backed in-memory implementation
pub mod memory;

use std::hash::Hash;

use pierre_core::models::WorkoutType;

pub use memory::LruPlannerCache;

/// Hit/miss counters of a cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found a value
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
}

/// Key-value cache with explicit eviction
pub trait PlannerCache<K, V>: Send {
    /// Look up a value
    fn get(&mut self, key: &K) -> Option<V>;

    /// Insert or replace a value
    fn set(&mut self, key: K, value: V);

    /// Remove a single entry, returning it
    fn evict(&mut self, key: &K) -> Option<V>;

    /// Remove all entries
    fn clear(&mut self);

    /// Number of entries
    fn len(&self) -> usize;

    /// Whether the cache holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters
    fn stats(&self) -> CacheStats;
}

/// Cache that stores nothing; used when caching is disabled
#[derive(Debug, Default)]
pub struct NoopCache {
    misses: u64,
}

impl<K, V> PlannerCache<K, V> for NoopCache {
    fn get(&mut self, _key: &K) -> Option<V> {
        self.misses += 1;
        None
    }

    fn set(&mut self, _key: K, _value: V) {}

    fn evict(&mut self, _key: &K) -> Option<V> {
        None
    }

    fn clear(&mut self) {}

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            misses: self.misses,
            ..CacheStats::default()
        }
    }
}

/// Pace lookup key: VDOT in tenths plus workout type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaceKey {
    vdot_tenths: u32,
    workout_type: WorkoutType,
}

impl PaceKey {
    /// Build a key; VDOT is quantized to 0.1
    #[must_use]
    pub fn new(vdot: f64, workout_type: WorkoutType) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let vdot_tenths = (vdot.max(0.0) * 10.0).round() as u32;
        Self {
            vdot_tenths,
            workout_type,
        }
    }
}

/// Memoized pace lookups (min/km)
pub type PaceCache = Box<dyn PlannerCache<PaceKey, f64>>;

/// Build a boxed cache: LRU with `capacity` when enabled, otherwise a no-op cache
#[must_use]
pub fn boxed_cache<K, V>(enabled: bool, capacity: usize) -> Box<dyn PlannerCache<K, V>>
where
    K: Hash + Eq + Send + 'static,
    V: Clone + Send + 'static,
{
    if enabled {
        Box::new(LruPlannerCache::new(capacity))
    } else {
        Box::new(NoopCache::default())
    }
}
