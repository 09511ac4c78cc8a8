// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch strategy selection.
//!
//! Priority order: configured `force_strategy` > complexity/confidence table.
//! The table:
//!
//! | complexity | confidence | strategy |
//! |---|---|---|
//! | 1-3 | any | `SINGLE_AGENT` |
//! | 4-7 | >= 0.8 | `SINGLE_AGENT` |
//! | 4-7 | < 0.8 | `SCATTER_GATHER` over the top N |
//! | 8-10 | any | `LOAD_BALANCED` over every scoring department |

use director_core::{ClassificationResult, DepartmentId, RoutingDecision, Strategy, TaskComplexity};

/// Complexity at or below which one agent always suffices.
pub const SIMPLE_MAX: u8 = 3;
/// Complexity at or above which work is load-balanced.
pub const LOAD_BALANCE_MIN: u8 = 8;
/// Confidence needed to keep a moderate task on one agent.
pub const SINGLE_AGENT_CONFIDENCE: f64 = 0.8;
/// Default number of scatter-gather targets.
pub const DEFAULT_SCATTER_GATHER_TOP_N: usize = 2;

/// Picks a strategy and its targets for a classification. Pure.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    top_n: usize,
    force: Option<Strategy>,
}

impl StrategySelector {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n: top_n.max(1),
            force: None,
        }
    }

    /// Pin every decision to `strategy`.
    pub fn with_forced(mut self, strategy: Option<Strategy>) -> Self {
        self.force = strategy;
        self
    }

    /// Build the routing decision for `classification` at `complexity`.
    ///
    /// The returned decision has `fallback_used == false`; the router sets it
    /// when escalation failed.
    pub fn select(
        &self,
        classification: &ClassificationResult,
        complexity: TaskComplexity,
    ) -> RoutingDecision {
        let ranked = rank(classification);
        let level = complexity.get();
        let confidence = classification.confidence.clamp(0.0, 1.0);
        let lead = &classification.department;

        let (strategy, targets, reasoning) = if let Some(forced) = self.force {
            self.forced(forced, classification, &ranked)
        } else if level <= SIMPLE_MAX {
            (
                Strategy::SingleAgent,
                vec![classified(classification, &ranked)],
                format!("complexity={level} <= {SIMPLE_MAX} -> SINGLE_AGENT to {lead}"),
            )
        } else if level < LOAD_BALANCE_MIN && confidence >= SINGLE_AGENT_CONFIDENCE {
            (
                Strategy::SingleAgent,
                vec![classified(classification, &ranked)],
                format!(
                    "complexity={level} with confidence {confidence:.2} >= {SINGLE_AGENT_CONFIDENCE:.2} -> SINGLE_AGENT to {lead}"
                ),
            )
        } else if level < LOAD_BALANCE_MIN {
            self.scatter_gather(level, confidence, &ranked)
        } else {
            let targets = ranked.clone();
            let reasoning = format!(
                "complexity={level} >= {LOAD_BALANCE_MIN} -> LOAD_BALANCED across {} department{} weighted by score",
                targets.len(),
                plural(targets.len())
            );
            (Strategy::LoadBalanced, targets, reasoning)
        };

        let weights = match strategy {
            Strategy::LoadBalanced => normalized_weights(&targets),
            _ => Vec::new(),
        };

        RoutingDecision {
            strategy,
            target_agents: targets.into_iter().map(|(id, _)| id).collect(),
            department: lead.clone(),
            method: classification.method,
            confidence,
            reasoning,
            fallback_used: false,
            weights,
        }
    }

    fn scatter_gather(
        &self,
        level: u8,
        confidence: f64,
        ranked: &[(DepartmentId, f64)],
    ) -> (Strategy, Vec<(DepartmentId, f64)>, String) {
        let targets: Vec<(DepartmentId, f64)> = ranked.iter().take(self.top_n).cloned().collect();
        let prefix = format!(
            "complexity={level} with confidence {confidence:.2} < {SINGLE_AGENT_CONFIDENCE:.2} -> SCATTER_GATHER"
        );
        let reasoning = if targets.len() < 2 {
            let cause = if ranked.len() < 2 {
                "only one department scored above zero".to_string()
            } else {
                format!("scatter_gather_top_n is {}", self.top_n)
            };
            format!("{prefix} degraded to a single target {} ({cause})", targets[0].0)
        } else {
            let names: Vec<&str> = targets.iter().map(|(id, _)| id.as_str()).collect();
            format!("{prefix} across top {}: {}", targets.len(), names.join(", "))
        };
        (Strategy::ScatterGather, targets, reasoning)
    }

    fn forced(
        &self,
        strategy: Strategy,
        classification: &ClassificationResult,
        ranked: &[(DepartmentId, f64)],
    ) -> (Strategy, Vec<(DepartmentId, f64)>, String) {
        let targets: Vec<(DepartmentId, f64)> = match strategy {
            Strategy::SingleAgent => vec![classified(classification, ranked)],
            Strategy::ScatterGather => ranked.iter().take(self.top_n).cloned().collect(),
            Strategy::LoadBalanced | Strategy::Sequential => ranked.to_vec(),
        };
        let reasoning = format!(
            "force_strategy={strategy} from configuration -> {strategy} across {} department{}",
            targets.len(),
            plural(targets.len())
        );
        (strategy, targets, reasoning)
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new(DEFAULT_SCATTER_GATHER_TOP_N)
    }
}

/// Every department with a nonzero score, by descending score. Ties keep
/// declaration order; a classified department outside the profile sorts
/// after the profiled ones it ties with.
///
/// The classified department's score is the larger of its keyword score and
/// the classification confidence. When nothing scored, the classified
/// department stands alone.
fn rank(classification: &ClassificationResult) -> Vec<(DepartmentId, f64)> {
    let lead = &classification.department;
    let keyword_score = classification
        .candidates
        .iter()
        .find(|c| c.department == *lead)
        .map_or(0.0, |c| c.score);
    let lead_score = keyword_score.max(classification.confidence).clamp(0.0, 1.0);

    let mut ranked: Vec<(DepartmentId, f64)> = classification
        .candidates
        .iter()
        .map(|c| {
            if c.department == *lead {
                (c.department.clone(), lead_score)
            } else {
                (c.department.clone(), c.score)
            }
        })
        .collect();
    if !ranked.iter().any(|(id, _)| id == lead) {
        ranked.push((lead.clone(), lead_score));
    }
    ranked.retain(|(_, score)| *score > 0.0);
    // Stable: equal scores stay in declaration order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    if ranked.is_empty() {
        ranked.push((lead.clone(), lead_score));
    }
    ranked
}

/// The classified department with its ranking score.
fn classified(
    classification: &ClassificationResult,
    ranked: &[(DepartmentId, f64)],
) -> (DepartmentId, f64) {
    let lead = &classification.department;
    ranked
        .iter()
        .find(|(id, _)| id == lead)
        .cloned()
        .unwrap_or_else(|| (lead.clone(), 0.0))
}

/// Scores scaled to sum to 1. Equal shares when every score is zero.
fn normalized_weights(targets: &[(DepartmentId, f64)]) -> Vec<f64> {
    let total: f64 = targets.iter().map(|(_, s)| *s).sum();
    if total <= 0.0 {
        let share = 1.0 / targets.len().max(1) as f64;
        return vec![share; targets.len()];
    }
    targets.iter().map(|(_, s)| s / total).collect()
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
