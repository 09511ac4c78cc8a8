// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Executes a routing decision against the handler registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use director_core::{DepartmentId, DirectorError, RoutingDecision, Strategy, Task};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::registry::HandlerRegistry;

/// Fractional part of the golden ratio. Multiples of it spread evenly over
/// `[0, 1)`, which interleaves weighted picks instead of batching them.
const GOLDEN_RATIO_FRACTION: f64 = 0.618_033_988_749_895;

/// One department's result.
#[derive(Debug)]
pub struct AgentOutcome {
    pub department: DepartmentId,
    pub result: Result<serde_json::Value, DirectorError>,
}

/// Every outcome produced while dispatching one decision, in execution order.
#[derive(Debug)]
pub struct DispatchReport {
    pub strategy: Strategy,
    pub outcomes: Vec<AgentOutcome>,
}

impl DispatchReport {
    /// True when at least one handler ran and none failed.
    pub fn is_success(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&DepartmentId, &serde_json::Value)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|v| (&o.department, v)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&DepartmentId, &DirectorError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.department, e)))
    }
}

/// Runs tasks on department handlers according to the decision's strategy.
#[derive(Debug)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    rotation: AtomicU64,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            rotation: AtomicU64::new(0),
        }
    }

    /// Dispatch `task` per `decision`.
    ///
    /// - `SINGLE_AGENT`: the first target.
    /// - `SCATTER_GATHER`: all targets concurrently; every outcome is kept.
    /// - `SEQUENTIAL`: targets in order, stopping at the first failure.
    /// - `LOAD_BALANCED`: one target picked by weighted rotation.
    pub async fn dispatch(&self, decision: &RoutingDecision, task: &Task) -> DispatchReport {
        let outcomes = match decision.strategy {
            Strategy::SingleAgent => match decision.target_agents.first() {
                Some(target) => vec![self.run(target, task).await],
                None => Vec::new(),
            },
            Strategy::ScatterGather => {
                join_all(decision.target_agents.iter().map(|t| self.run(t, task))).await
            }
            Strategy::Sequential => {
                let mut outcomes = Vec::with_capacity(decision.target_agents.len());
                for target in &decision.target_agents {
                    let outcome = self.run(target, task).await;
                    let failed = outcome.result.is_err();
                    outcomes.push(outcome);
                    if failed {
                        warn!(department = %target, "sequential dispatch stopped at failure");
                        break;
                    }
                }
                outcomes
            }
            Strategy::LoadBalanced => {
                let tick = self.rotation.fetch_add(1, Ordering::Relaxed);
                match pick_weighted(&decision.target_agents, &decision.weights, tick) {
                    Some(target) => vec![self.run(target, task).await],
                    None => Vec::new(),
                }
            }
        };

        DispatchReport {
            strategy: decision.strategy,
            outcomes,
        }
    }

    async fn run(&self, department: &DepartmentId, task: &Task) -> AgentOutcome {
        let result = match self.registry.get(department) {
            Some(handler) => handler.handle(task).await,
            None => Err(DirectorError::HandlerNotFound {
                department: department.to_string(),
            }),
        };
        debug!(department = %department, ok = result.is_ok(), "handler finished");
        AgentOutcome {
            department: department.clone(),
            result,
        }
    }
}

/// Pick the target whose cumulative weight interval holds the `tick`-th
/// point of a golden-ratio sequence. Falls back to equal weights when the
/// weights do not line up with the targets.
fn pick_weighted<'a>(targets: &'a [DepartmentId], weights: &[f64], tick: u64) -> Option<&'a DepartmentId> {
    if targets.is_empty() {
        return None;
    }
    let usable = weights.len() == targets.len()
        && weights.iter().all(|w| w.is_finite() && *w >= 0.0)
        && weights.iter().sum::<f64>() > 0.0;
    let equal = vec![1.0; targets.len()];
    let weights = if usable { weights } else { &equal[..] };
    let total: f64 = weights.iter().sum();

    let point = (tick as f64 * GOLDEN_RATIO_FRACTION).fract() * total;
    let mut cumulative = 0.0;
    for (target, weight) in targets.iter().zip(weights) {
        cumulative += weight;
        if point < cumulative {
            return Some(target);
        }
    }
    targets.last()
}
