// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing statistics collector, injected into the router at construction.

use crate::types::{EscalationOutcome, RoutingDecision};

/// Receives routing events. Implementations must be cheap and thread-safe;
/// they are called inline on the routing path.
pub trait RoutingMetrics: Send + Sync {
    /// A decision was produced.
    fn record_decision(&self, decision: &RoutingDecision);

    /// An escalation attempt finished with the given outcome.
    fn record_escalation(&self, outcome: EscalationOutcome);

    /// The classification cache was consulted.
    fn record_cache(&self, hit: bool);

    /// A task was rejected before routing.
    fn record_invalid_task(&self);
}
