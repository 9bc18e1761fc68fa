// ABOUTME: Resolves the closed Methodology enum to a philosophy implementation
// ABOUTME: Instances are memoized in an injectable LRU cache instead of a process-wide singleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use pierre_core::models::Methodology;

use super::{
    DanielsPhilosophy, HansonPhilosophy, LydiardPhilosophy, MethodologyPhilosophy,
    PfitzingerPhilosophy, PolarizedPhilosophy,
};
use crate::cache::{boxed_cache, CacheStats, PlannerCache};
use crate::config::PlannerConfig;

/// Cache of resolved philosophies
pub type MethodologyCache = Box<dyn PlannerCache<Methodology, Arc<dyn MethodologyPhilosophy>>>;

/// Methodology factory
pub struct MethodologyFactory {
    cache: MethodologyCache,
}

impl Default for MethodologyFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodologyFactory {
    /// Create a factory with a cache sized from the global configuration
    #[must_use]
    pub fn new() -> Self {
        let cache_config = &PlannerConfig::global().cache;
        Self::with_cache(boxed_cache(
            cache_config.enabled,
            cache_config.methodology_capacity,
        ))
    }

    /// Create a factory with an injected cache
    #[must_use]
    pub fn with_cache(cache: MethodologyCache) -> Self {
        Self { cache }
    }

    /// Build a fresh, uncached philosophy
    #[must_use]
    pub fn build(methodology: Methodology) -> Arc<dyn MethodologyPhilosophy> {
        match methodology {
            Methodology::Daniels => Arc::new(DanielsPhilosophy),
            Methodology::Lydiard => Arc::new(LydiardPhilosophy),
            Methodology::Pfitzinger => Arc::new(PfitzingerPhilosophy),
            Methodology::Hanson => Arc::new(HansonPhilosophy),
            Methodology::Polarized => Arc::new(PolarizedPhilosophy),
        }
    }

    /// Resolve a methodology, using the cache when possible
    pub fn philosophy(&mut self, methodology: Methodology) -> Arc<dyn MethodologyPhilosophy> {
        if let Some(cached) = self.cache.get(&methodology) {
            return cached;
        }
        tracing::debug!(methodology = ?methodology, "Building methodology philosophy");
        let philosophy = Self::build(methodology);
        self.cache.set(methodology, Arc::clone(&philosophy));
        philosophy
    }

    /// Drop a cached philosophy
    pub fn evict(&mut self, methodology: Methodology) -> bool {
        self.cache.evict(&methodology).is_some()
    }

    /// Drop every cached philosophy
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Cache counters
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
