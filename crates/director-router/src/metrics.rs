// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local routing statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use director_core::{EscalationOutcome, RoutingDecision, RoutingMetrics, Strategy};
use serde::Serialize;

/// Atomic counters behind [`RoutingMetrics`]. Lock-free and cheap to share.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    decisions: AtomicU64,
    single_agent: AtomicU64,
    scatter_gather: AtomicU64,
    load_balanced: AtomicU64,
    sequential: AtomicU64,
    fallbacks: AtomicU64,
    classified: AtomicU64,
    cached: AtomicU64,
    timed_out: AtomicU64,
    failed: AtomicU64,
    unavailable: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    invalid_tasks: AtomicU64,
}

/// Point-in-time copy of [`InMemoryMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub decisions: u64,
    pub single_agent: u64,
    pub scatter_gather: u64,
    pub load_balanced: u64,
    pub sequential: u64,
    pub fallbacks: u64,
    pub escalations_classified: u64,
    pub escalations_cached: u64,
    pub escalations_timed_out: u64,
    pub escalations_failed: u64,
    pub escalations_unavailable: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub invalid_tasks: u64,
}

impl MetricsSnapshot {
    /// Escalation attempts of any outcome.
    pub fn escalations(&self) -> u64 {
        self.escalations_classified
            + self.escalations_cached
            + self.escalations_timed_out
            + self.escalations_failed
            + self.escalations_unavailable
    }
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let get = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        MetricsSnapshot {
            decisions: get(&self.decisions),
            single_agent: get(&self.single_agent),
            scatter_gather: get(&self.scatter_gather),
            load_balanced: get(&self.load_balanced),
            sequential: get(&self.sequential),
            fallbacks: get(&self.fallbacks),
            escalations_classified: get(&self.classified),
            escalations_cached: get(&self.cached),
            escalations_timed_out: get(&self.timed_out),
            escalations_failed: get(&self.failed),
            escalations_unavailable: get(&self.unavailable),
            cache_hits: get(&self.cache_hits),
            cache_misses: get(&self.cache_misses),
            invalid_tasks: get(&self.invalid_tasks),
        }
    }
}

impl RoutingMetrics for InMemoryMetrics {
    fn record_decision(&self, decision: &RoutingDecision) {
        self.decisions.fetch_add(1, Ordering::Relaxed);
        let by_strategy = match decision.strategy {
            Strategy::SingleAgent => &self.single_agent,
            Strategy::ScatterGather => &self.scatter_gather,
            Strategy::LoadBalanced => &self.load_balanced,
            Strategy::Sequential => &self.sequential,
        };
        by_strategy.fetch_add(1, Ordering::Relaxed);
        if decision.fallback_used {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_escalation(&self, outcome: EscalationOutcome) {
        let counter = match outcome {
            EscalationOutcome::Classified => &self.classified,
            EscalationOutcome::Cached => &self.cached,
            EscalationOutcome::TimedOut => &self.timed_out,
            EscalationOutcome::Failed => &self.failed,
            EscalationOutcome::Unavailable => &self.unavailable,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cache(&self, hit: bool) {
        let counter = if hit {
            &self.cache_hits
        } else {
            &self.cache_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn record_invalid_task(&self) {
        self.invalid_tasks.fetch_add(1, Ordering::Relaxed);
    }
}
