//! TTL decision cache backed by DashMap

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use super::decision::Decision;
use crate::types::Identity;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache
    pub capacity: usize,

    /// Time-to-live for cached decisions
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            ttl: Duration::from_secs(300),
        }
    }
}

/// Everything a decision depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    identity: Identity,
    scope: Option<String>,
}

impl CacheKey {
    fn new(identity: &Identity, scope: Option<&str>) -> Self {
        Self {
            identity: identity.clone(),
            scope: scope.map(str::to_owned),
        }
    }
}

/// Cached entry with TTL
#[derive(Clone)]
struct CachedEntry {
    decision: Decision,
    cached_at: Instant,
}

impl CachedEntry {
    fn new(decision: Decision) -> Self {
        Self {
            decision,
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of expired entries encountered
    pub expirations: usize,
    /// Total number of entries in cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Decision cache
///
/// Decisions are pure functions of identity and scope, so a cached entry
/// only goes stale when the identity's roles change, which changes the key.
/// The TTL bounds memory held for identities that stop calling.
pub struct DecisionCache {
    entries: Arc<DashMap<CacheKey, CachedEntry>>,
    config: CacheConfig,
    stats: Arc<DashMap<&'static str, usize>>,
}

impl DecisionCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            config,
            stats: Arc::new(DashMap::new()),
        }
    }

    /// Get a cached decision
    pub fn get(&self, identity: &Identity, scope: Option<&str>) -> Option<Decision> {
        let key = CacheKey::new(identity, scope);

        if let Some(entry) = self.entries.get(&key) {
            if entry.is_expired(self.config.ttl) {
                drop(entry);
                self.entries.remove(&key);
                self.increment_stat("expirations");
                self.increment_stat("misses");
                return None;
            }

            self.increment_stat("hits");
            return Some(entry.decision.clone());
        }

        self.increment_stat("misses");
        None
    }

    /// Store a decision in the cache
    ///
    /// When the cache is full, expired entries are purged first. If it is
    /// still full the decision is not stored.
    pub fn put(&self, identity: &Identity, scope: Option<&str>, decision: Decision) {
        if self.entries.len() >= self.config.capacity {
            self.purge_expired();

            if self.entries.len() >= self.config.capacity {
                debug!(capacity = self.config.capacity, "decision cache full, skipping insert");
                return;
            }
        }

        self.entries
            .insert(CacheKey::new(identity, scope), CachedEntry::new(decision));
    }

    /// Remove all expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let ttl = self.config.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            *self.stats.entry("expirations").or_insert(0) += removed;
        }
        removed
    }

    /// Clear all cached decisions
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            expirations: self.get_stat("expirations"),
            entries: self.entries.len(),
        }
    }

    fn increment_stat(&self, key: &'static str) {
        *self.stats.entry(key).or_insert(0) += 1;
    }

    fn get_stat(&self, key: &str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}
