//! Decision counters for observability

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::decision::DecisionKind;

/// Point-in-time copy of the decision counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total number of authorization calls
    pub total_requests: u64,

    /// Decisions carrying a grant
    pub granted: u64,

    /// Decisions with an empty grant list
    pub denied: u64,

    /// Calls rejected because the scope was malformed
    pub rejected: u64,

    /// Decisions by rule
    pub by_kind: HashMap<DecisionKind, u64>,
}

impl MetricsSnapshot {
    /// Fraction of decisions that carried a grant
    pub fn grant_rate(&self) -> f64 {
        let total = self.granted + self.denied;
        if total == 0 {
            0.0
        } else {
            self.granted as f64 / total as f64
        }
    }

    pub fn count(&self, kind: DecisionKind) -> u64 {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Lock-free decision metrics
#[derive(Debug, Default)]
pub struct DecisionMetrics {
    total_requests: AtomicU64,
    granted: AtomicU64,
    denied: AtomicU64,
    rejected: AtomicU64,
    by_kind: [AtomicU64; DecisionKind::ALL.len()],
}

impl DecisionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed decision
    pub fn record_decision(&self, kind: DecisionKind) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        if kind.is_grant() {
            self.granted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.denied.fetch_add(1, Ordering::Relaxed);
        }

        self.by_kind[Self::slot(kind)].fetch_add(1, Ordering::Relaxed);
    }

    /// Record a call rejected for a malformed scope
    pub fn record_rejection(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let by_kind = DecisionKind::ALL
            .iter()
            .map(|kind| (*kind, self.by_kind[Self::slot(*kind)].load(Ordering::Relaxed)))
            .collect();

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            granted: self.granted.load(Ordering::Relaxed),
            denied: self.denied.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            by_kind,
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.total_requests.store(0, Ordering::Relaxed);
        self.granted.store(0, Ordering::Relaxed);
        self.denied.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        for counter in &self.by_kind {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn slot(kind: DecisionKind) -> usize {
        kind as usize
    }
}
