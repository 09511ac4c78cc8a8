// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics.

use director_core::{ClassificationMethod, EscalationOutcome, Strategy};
use metrics::{describe_counter, describe_histogram};

pub const DECISIONS_TOTAL: &str = "director_decisions_total";
pub const FALLBACKS_TOTAL: &str = "director_fallbacks_total";
pub const DECISION_CONFIDENCE: &str = "director_decision_confidence";
pub const ESCALATIONS_TOTAL: &str = "director_escalations_total";
pub const CACHE_LOOKUPS_TOTAL: &str = "director_cache_lookups_total";
pub const INVALID_TASKS_TOTAL: &str = "director_invalid_tasks_total";

/// Register all director metric descriptions.
///
/// Called once after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(DECISIONS_TOTAL, "Routing decisions by strategy and method");
    describe_counter!(
        FALLBACKS_TOTAL,
        "Decisions that kept the keyword result after a failed escalation"
    );
    describe_histogram!(DECISION_CONFIDENCE, "Confidence of routing decisions");
    describe_counter!(ESCALATIONS_TOTAL, "Language-model escalations by outcome");
    describe_counter!(CACHE_LOOKUPS_TOTAL, "Classification cache lookups by result");
    describe_counter!(INVALID_TASKS_TOTAL, "Tasks rejected before routing");
}

/// Record one routing decision.
pub fn record_decision(
    strategy: Strategy,
    method: ClassificationMethod,
    confidence: f64,
    fallback_used: bool,
) {
    metrics::counter!(
        DECISIONS_TOTAL,
        "strategy" => strategy.to_string(),
        "method" => method.to_string()
    )
    .increment(1);
    metrics::histogram!(DECISION_CONFIDENCE).record(confidence);
    if fallback_used {
        metrics::counter!(FALLBACKS_TOTAL).increment(1);
    }
}

/// Record the outcome of an escalation.
pub fn record_escalation(outcome: EscalationOutcome) {
    metrics::counter!(ESCALATIONS_TOTAL, "outcome" => outcome.to_string()).increment(1);
}

/// Record a cache lookup.
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!(CACHE_LOOKUPS_TOTAL, "result" => result).increment(1);
}

/// Record a rejected task.
pub fn record_invalid_task() {
    metrics::counter!(INVALID_TASKS_TOTAL).increment(1);
}
