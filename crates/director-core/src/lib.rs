// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the SwarmDirector intent router.
//!
//! This crate provides the error type, the routing data model, and the
//! adapter traits (LLM classifier, department handler, metrics collector)
//! shared by every other crate in the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DirectorError;
pub use types::{
    ClassificationMethod, ClassificationResult, DepartmentId, DepartmentScore, EscalationOutcome,
    LlmVerdict, RoutingDecision, RoutingResponse, Strategy, Task, TaskComplexity,
};

pub use traits::{DepartmentHandler, IntentClassifier, RoutingMetrics};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn decision(strategy: Strategy, targets: &[&str]) -> RoutingDecision {
        RoutingDecision {
            strategy,
            target_agents: targets.iter().map(|t| DepartmentId::from(*t)).collect(),
            department: DepartmentId::from(targets[0]),
            method: ClassificationMethod::Keyword,
            confidence: 0.9,
            reasoning: "test".into(),
            fallback_used: false,
            weights: Vec::new(),
        }
    }

    #[test]
    fn director_error_variants_render() {
        let invalid = DirectorError::InvalidTask {
            reason: "description is empty".into(),
        };
        assert_eq!(invalid.to_string(), "invalid task: description is empty");

        let timeout = DirectorError::Timeout {
            duration: std::time::Duration::from_secs(10),
        };
        assert!(timeout.to_string().contains("10s"));

        let missing = DirectorError::HandlerNotFound {
            department: "analysis".into(),
        };
        assert!(missing.to_string().contains("`analysis`"));
    }

    #[test]
    fn strategy_wire_names() {
        assert_eq!(Strategy::LoadBalanced.to_string(), "LOAD_BALANCED");
        assert_eq!(
            serde_json::to_string(&Strategy::ScatterGather).unwrap(),
            "\"SCATTER_GATHER\""
        );
        assert_eq!(
            Strategy::from_str("single_agent").unwrap(),
            Strategy::SingleAgent
        );
        assert!(Strategy::from_str("round_robin").is_err());
    }

    #[test]
    fn method_wire_names() {
        assert_eq!(ClassificationMethod::Llm.to_string(), "LLM");
        assert_eq!(
            serde_json::to_string(&ClassificationMethod::Cached).unwrap(),
            "\"CACHED\""
        );
    }

    #[test]
    fn task_complexity_bounds() {
        assert!(TaskComplexity::new(0).is_none());
        assert!(TaskComplexity::new(11).is_none());
        assert_eq!(TaskComplexity::new(7).unwrap().get(), 7);
        assert_eq!(TaskComplexity::saturating(-4).get(), 1);
        assert_eq!(TaskComplexity::saturating(42).get(), 10);
        assert!(serde_json::from_str::<TaskComplexity>("12").is_err());
    }

    #[test]
    fn task_deserializes_with_type_key() {
        let task: Task = serde_json::from_str(
            r#"{"type": "email", "title": "Update", "description": "send it", "raw_payload": {"priority": 2}}"#,
        )
        .unwrap();
        assert_eq!(task.task_type, "email");
        assert_eq!(task.raw_payload["priority"], 2);

        let minimal: Task = serde_json::from_str(r#"{"description": "only this"}"#).unwrap();
        assert!(minimal.title.is_empty());
        assert!(minimal.raw_payload.is_empty());
    }

    #[test]
    fn response_adds_routed_to_for_single_agent() {
        let single = RoutingResponse::from(&decision(Strategy::SingleAgent, &["communications"]));
        assert_eq!(single.routed_to, Some(DepartmentId::from("communications")));

        let json = serde_json::to_value(&single).unwrap();
        assert_eq!(json["routed_to"], "communications");
        assert_eq!(json["target_agents"][0], "communications");
        assert!(json.get("weights").is_none());
    }

    #[test]
    fn response_omits_routed_to_for_multi_agent() {
        let scatter = RoutingResponse::from(&decision(
            Strategy::ScatterGather,
            &["communications", "analysis"],
        ));
        assert!(scatter.routed_to.is_none());
        let json = serde_json::to_value(&scatter).unwrap();
        assert!(json.get("routed_to").is_none());
        assert_eq!(json["strategy"], "SCATTER_GATHER");
    }
}
