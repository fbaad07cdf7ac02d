//! Authorization service
//!
//! Wraps the pure [`ScopeAuthorizer`] with decision caching, metrics and
//! logging for hosts that issue many tokens.

pub mod cache;
pub mod decision;
pub mod metrics;

pub use cache::{CacheConfig, CacheStats, DecisionCache};
pub use decision::{Decision, DecisionKind};
pub use metrics::{DecisionMetrics, MetricsSnapshot};

use tracing::{debug, info, warn};

use crate::authorizer::ScopeAuthorizer;
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::types::{AccessItem, Identity};

/// Shared authorization service
///
/// # Architecture
///
/// ```text
/// (Identity, scope) → [Cache] → ScopeAuthorizer → Decision
///                        ↓                          ↓
///                    [Metrics] ←────────────────────┘
/// ```
///
/// The service is `Send + Sync`; share it behind an `Arc`.
pub struct AuthorizationService {
    authorizer: ScopeAuthorizer,
    cache: Option<DecisionCache>,
    metrics: Option<DecisionMetrics>,
    config: ServiceConfig,
}

impl AuthorizationService {
    pub fn new(config: ServiceConfig) -> Self {
        let cache = config
            .enable_cache
            .then(|| DecisionCache::new(config.cache_config()));
        let metrics = config.enable_metrics.then(DecisionMetrics::new);

        info!(
            "AuthorizationService initialized with cache={}, metrics={}",
            config.enable_cache, config.enable_metrics
        );

        Self {
            authorizer: ScopeAuthorizer::new(),
            cache,
            metrics,
            config,
        }
    }

    /// Decide a request, consulting the cache first
    ///
    /// Rejected scopes are never cached.
    pub fn decide(&self, identity: &Identity, requested_scope: Option<&str>) -> Result<Decision> {
        if let Some(cache) = &self.cache {
            if let Some(decision) = cache.get(identity, requested_scope) {
                debug!(username = %identity.username, kind = %decision.kind, "cache hit");
                self.record(&decision);
                return Ok(decision);
            }
        }

        let decision = match self.authorizer.decide(identity, requested_scope) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(
                    username = %identity.username,
                    scope = requested_scope.unwrap_or_default(),
                    error = %e,
                    "rejected scope request"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_rejection();
                }
                return Err(e);
            }
        };

        debug!(
            username = %identity.username,
            scope = requested_scope.unwrap_or_default(),
            kind = %decision.kind,
            granted = decision.is_granted(),
            "scope decision"
        );

        if let Some(cache) = &self.cache {
            cache.put(identity, requested_scope, decision.clone());
        }
        self.record(&decision);

        Ok(decision)
    }

    /// Grant list for a request
    pub fn authorize(
        &self,
        identity: &Identity,
        requested_scope: Option<&str>,
    ) -> Result<Vec<AccessItem>> {
        self.decide(identity, requested_scope).map(Decision::into_access)
    }

    /// Drop every cached decision
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            info!("decision cache cleared");
        }
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(DecisionCache::stats)
    }

    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.as_ref().map(DecisionMetrics::snapshot)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn record(&self, decision: &Decision) {
        if let Some(metrics) = &self.metrics {
            metrics.record_decision(decision.kind);
        }
    }
}

impl Default for AuthorizationService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
