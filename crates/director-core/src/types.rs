// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the scorer, gate, selector, and router.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A task submitted by the calling web layer. Read-only to the router.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Caller-defined task type (e.g. "email", "report").
    #[serde(rename = "type", default)]
    pub task_type: String,
    /// Short human-readable title.
    #[serde(default)]
    pub title: String,
    /// Free-form description. The only field routing depends on.
    #[serde(default)]
    pub description: String,
    /// Opaque payload passed through unchanged.
    #[serde(default)]
    pub raw_payload: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Create a task with the given description and empty metadata.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Map<String, serde_json::Value>) -> Self {
        self.raw_payload = payload;
        self
    }
}

/// Identifier of a task-handling department (e.g. "communications").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(pub String);

impl DepartmentId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DepartmentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DepartmentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How a classification was obtained.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationMethod {
    /// Keyword scoring against the department profile.
    Keyword,
    /// Fresh language-model classification.
    Llm,
    /// Language-model classification served from the cache.
    Cached,
}

/// Dispatch strategy chosen for a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Strategy {
    /// One department handles the task.
    SingleAgent,
    /// The same task goes to several departments and their answers are aggregated.
    ScatterGather,
    /// Work is spread across departments weighted by suitability.
    LoadBalanced,
    /// Departments handle the task one after another.
    Sequential,
}

/// Keyword score of a single department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentScore {
    pub department: DepartmentId,
    /// Fraction of the department's keywords found in the text, in `[0, 1]`.
    pub score: f64,
    /// Matched keywords in profile declaration order.
    pub matched_keywords: Vec<String>,
}

/// Outcome of classifying a task into a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub department: DepartmentId,
    /// Confidence in `[0, 1]`. For `Llm`/`Cached` this is the model's score.
    pub confidence: f64,
    pub method: ClassificationMethod,
    pub matched_keywords: Vec<String>,
    /// Keyword scores of every profiled department, in declaration order.
    pub candidates: Vec<DepartmentScore>,
}

/// Raw answer from a language-model classifier before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmVerdict {
    pub department: String,
    pub confidence: f64,
}

/// Task complexity on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TaskComplexity(u8);

impl TaskComplexity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Returns `None` when `value` is outside `1..=10`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Clamp an arbitrary heuristic score into range.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TaskComplexity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("task complexity must be 1-10, got {value}"))
    }
}

impl From<TaskComplexity> for u8 {
    fn from(value: TaskComplexity) -> Self {
        value.0
    }
}

impl fmt::Display for TaskComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The router's answer for one task. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub strategy: Strategy,
    /// Departments that should receive the task, best first. Never empty.
    pub target_agents: Vec<DepartmentId>,
    /// Classified department the decision is anchored on.
    pub department: DepartmentId,
    pub method: ClassificationMethod,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Names the strategy and the factor that decided it.
    pub reasoning: String,
    /// True when escalation was attempted but the keyword result had to stand.
    pub fallback_used: bool,
    /// Per-target shares under `LoadBalanced`; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
}

/// JSON shape returned to HTTP callers.
///
/// `target_agents` is always present. Single-agent decisions also carry
/// `routed_to` for callers that expect the older key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResponse {
    pub strategy: Strategy,
    pub target_agents: Vec<DepartmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routed_to: Option<DepartmentId>,
    pub department: DepartmentId,
    pub method: ClassificationMethod,
    pub confidence: f64,
    pub reasoning: String,
    pub fallback_used: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
}

impl From<&RoutingDecision> for RoutingResponse {
    fn from(decision: &RoutingDecision) -> Self {
        let routed_to = match decision.strategy {
            Strategy::SingleAgent => decision.target_agents.first().cloned(),
            _ => None,
        };
        Self {
            strategy: decision.strategy,
            target_agents: decision.target_agents.clone(),
            routed_to,
            department: decision.department.clone(),
            method: decision.method,
            confidence: decision.confidence,
            reasoning: decision.reasoning.clone(),
            fallback_used: decision.fallback_used,
            weights: decision.weights.clone(),
        }
    }
}

/// Result of an escalation attempt, reported to metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum EscalationOutcome {
    /// The LLM answered and its result was used.
    Classified,
    /// A cached LLM result was used.
    Cached,
    /// Every attempt timed out; keyword result stands.
    TimedOut,
    /// Transport or validation failure; keyword result stands.
    Failed,
    /// Escalation was needed but no classifier is configured.
    Unavailable,
}
