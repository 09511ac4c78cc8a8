// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus routing metrics for the SwarmDirector router.
//!
//! Uses the metrics-rs facade with the Prometheus exporter. Metrics are
//! rendered as Prometheus text format via [`PrometheusMetrics::render`].

pub mod recording;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use director_core::{DirectorError, EscalationOutcome, RoutingDecision, RoutingMetrics};

/// [`RoutingMetrics`] implementation backed by the Prometheus exporter.
pub struct PrometheusMetrics {
    handle: PrometheusHandle,
}

impl PrometheusMetrics {
    /// Installs the Prometheus recorder globally.
    ///
    /// Only one recorder can be installed per process. Returns an error if a
    /// recorder is already installed.
    pub fn install() -> Result<Self, DirectorError> {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            DirectorError::Internal(format!("failed to install Prometheus recorder: {e}"))
        })?;

        recording::register_metrics();
        tracing::info!("prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Wraps a handle from a recorder installed elsewhere.
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// Get a reference to the Prometheus handle for rendering.
    pub fn handle(&self) -> &PrometheusHandle {
        &self.handle
    }

    /// Render all collected metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl RoutingMetrics for PrometheusMetrics {
    fn record_decision(&self, decision: &RoutingDecision) {
        recording::record_decision(
            decision.strategy,
            decision.method,
            decision.confidence,
            decision.fallback_used,
        );
    }

    fn record_escalation(&self, outcome: EscalationOutcome) {
        recording::record_escalation(outcome);
    }

    fn record_cache(&self, hit: bool) {
        recording::record_cache_lookup(hit);
    }

    fn record_invalid_task(&self) {
        recording::record_invalid_task();
    }
}
