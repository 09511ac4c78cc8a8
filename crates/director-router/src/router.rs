// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent routing pipeline.
//!
//! `RECEIVED -> SCORED -> (ESCALATED | GATED) -> STRATEGIZED -> DONE`
//!
//! The keyword phase is synchronous and always yields a usable result. The
//! language-model phase only runs for low-confidence tasks and can override
//! that result, never replace the need for it.

use std::sync::Arc;
use std::time::Duration;

use director_config::{DepartmentConfig, DirectorConfig, RoutingConfig};
use director_core::{
    ClassificationMethod, ClassificationResult, DirectorError, EscalationOutcome,
    IntentClassifier, RoutingDecision, RoutingMetrics, Task, TaskComplexity,
};
use strum::Display;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::ClassificationCache;
use crate::complexity::ComplexityEstimator;
use crate::escalation::{EscalationPolicy, Escalator, ValidatedVerdict};
use crate::gate::{ConfidenceGate, GateDecision};
use crate::profile::{KeywordProfile, ProfileStore};
use crate::scorer::{KeywordScorer, KeywordScores};
use crate::strategy::StrategySelector;

/// The only error that leaves the router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The task has nothing to route on. Never retried.
    #[error("invalid task: {reason}")]
    InvalidTask { reason: String },
}

impl From<RouteError> for DirectorError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::InvalidTask { reason } => DirectorError::InvalidTask { reason },
        }
    }
}

/// Pipeline stage, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStage {
    Received,
    Scored,
    Gated,
    Escalated,
    Strategized,
    Done,
}

/// Classification plus what escalation contributed to it.
struct Resolution {
    classification: ClassificationResult,
    fallback_used: bool,
    note: String,
}

/// Orchestrates scoring, gating, escalation, and strategy selection.
///
/// `Send + Sync`; share it behind an `Arc` and call [`route`](Self::route)
/// from as many tasks as needed.
pub struct IntentRouter {
    profiles: ProfileStore,
    scorer: KeywordScorer,
    gate: ConfidenceGate,
    selector: StrategySelector,
    estimator: ComplexityEstimator,
    escalator: Option<Escalator>,
    cache: Option<ClassificationCache>,
    metrics: Arc<dyn RoutingMetrics>,
}

impl std::fmt::Debug for IntentRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRouter")
            .field("escalator", &self.escalator)
            .finish_non_exhaustive()
    }
}

impl IntentRouter {
    /// Create a keyword-only router. Add a classifier with
    /// [`with_classifier`](Self::with_classifier).
    pub fn new(
        profile: KeywordProfile,
        routing: &RoutingConfig,
        metrics: Arc<dyn RoutingMetrics>,
    ) -> Self {
        Self {
            profiles: ProfileStore::new(profile),
            scorer: KeywordScorer::new(),
            gate: ConfidenceGate::new(routing.confidence_threshold),
            selector: StrategySelector::new(routing.scatter_gather_top_n)
                .with_forced(routing.force_strategy),
            estimator: ComplexityEstimator::new(),
            escalator: None,
            cache: None,
            metrics,
        }
    }

    /// Build a router from loaded configuration.
    ///
    /// `classifier` is attached only when `llm.enabled` is set; the cache only
    /// when `cache.enabled` is set.
    pub fn from_config(
        config: &DirectorConfig,
        departments: &[DepartmentConfig],
        classifier: Option<Arc<dyn IntentClassifier>>,
        metrics: Arc<dyn RoutingMetrics>,
    ) -> Result<Self, DirectorError> {
        let profile = KeywordProfile::from_config(departments, &config.routing.default_department)?;
        let mut router = Self::new(profile, &config.routing, metrics);

        if config.llm.enabled {
            if let Some(classifier) = classifier {
                router = router.with_classifier(classifier, EscalationPolicy::from_config(&config.llm));
            }
        }
        if config.cache.enabled {
            router = router.with_cache(ClassificationCache::new(
                Duration::from_secs(config.cache.ttl_secs),
                config.cache.max_entries,
            ));
        }
        Ok(router)
    }

    pub fn with_classifier(
        mut self,
        classifier: Arc<dyn IntentClassifier>,
        policy: EscalationPolicy,
    ) -> Self {
        self.escalator = Some(Escalator::new(classifier, policy));
        self
    }

    pub fn with_cache(mut self, cache: ClassificationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Snapshot of the active keyword profile.
    pub fn profile(&self) -> Arc<KeywordProfile> {
        self.profiles.load()
    }

    pub fn threshold(&self) -> f64 {
        self.gate.threshold()
    }

    pub fn has_classifier(&self) -> bool {
        self.escalator.is_some()
    }

    /// Swap in a new keyword profile. In-flight routes finish on the profile
    /// they started with. Cached classifications are dropped.
    pub fn reload_profile(&self, profile: KeywordProfile) {
        let departments = profile.len();
        let previous = self.profiles.swap(profile);
        if let Some(cache) = &self.cache {
            cache.clear();
        }
        info!(
            previous_departments = previous.len(),
            departments, "keyword profile reloaded"
        );
    }

    /// Route a task, estimating its complexity from the description.
    pub async fn route(&self, task: &Task) -> Result<RoutingDecision, RouteError> {
        self.validate(task)?;
        let complexity = self.estimator.estimate(&task.description);
        Ok(self.run(task, complexity).await)
    }

    /// Route a task with a caller-supplied complexity.
    pub async fn route_with_complexity(
        &self,
        task: &Task,
        complexity: TaskComplexity,
    ) -> Result<RoutingDecision, RouteError> {
        self.validate(task)?;
        Ok(self.run(task, complexity).await)
    }

    fn validate(&self, task: &Task) -> Result<(), RouteError> {
        if task.description.trim().is_empty() {
            self.metrics.record_invalid_task();
            debug!(title = %task.title, "rejecting task with empty description");
            return Err(RouteError::InvalidTask {
                reason: "description is empty".to_string(),
            });
        }
        Ok(())
    }

    async fn run(&self, task: &Task, complexity: TaskComplexity) -> RoutingDecision {
        let title = task.title.as_str();
        let profile = self.profiles.load();
        debug!(title, stage = %RouteStage::Received, task_type = %task.task_type, "task accepted");

        let scores = self.scorer.score(&task.description, &profile);
        debug!(title, stage = %RouteStage::Scored, departments = profile.len(), "keyword scoring done");

        let gate = self.gate.decide(&scores, profile.default_department());
        debug!(
            title,
            stage = %RouteStage::Gated,
            department = %gate.department,
            confidence = gate.confidence,
            needs_escalation = gate.needs_escalation,
            "confidence gate"
        );

        let resolution = if gate.needs_escalation {
            let resolution = self.escalate(task, &profile, &gate, scores).await;
            debug!(
                title,
                stage = %RouteStage::Escalated,
                method = %resolution.classification.method,
                fallback_used = resolution.fallback_used,
                "escalation finished"
            );
            resolution
        } else {
            Resolution {
                note: format!(
                    "keyword score {:.2} for {} met threshold {:.2}",
                    gate.confidence,
                    gate.department,
                    self.gate.threshold()
                ),
                classification: keyword_classification(&gate, scores),
                fallback_used: false,
            }
        };

        let selected = self.selector.select(&resolution.classification, complexity);
        debug!(
            title,
            stage = %RouteStage::Strategized,
            strategy = %selected.strategy,
            complexity = complexity.get(),
            "strategy selected"
        );

        let decision = RoutingDecision {
            fallback_used: resolution.fallback_used,
            reasoning: format!("{}; {}", resolution.note, selected.reasoning),
            ..selected
        };
        self.metrics.record_decision(&decision);

        info!(
            title,
            stage = %RouteStage::Done,
            strategy = %decision.strategy,
            department = %decision.department,
            method = %decision.method,
            confidence = decision.confidence,
            fallback_used = decision.fallback_used,
            targets = decision.target_agents.len(),
            "routing decision"
        );
        decision
    }

    async fn escalate(
        &self,
        task: &Task,
        profile: &KeywordProfile,
        gate: &GateDecision,
        scores: KeywordScores,
    ) -> Resolution {
        let below = format!(
            "keyword confidence {:.2} below threshold {:.2}",
            gate.confidence,
            self.gate.threshold()
        );
        let standing = if gate.confidence > 0.0 {
            format!("keyword result {} at {:.2} stands", gate.department, gate.confidence)
        } else {
            format!("no keyword matched, default department {} stands", gate.department)
        };

        let Some(escalator) = &self.escalator else {
            self.metrics.record_escalation(EscalationOutcome::Unavailable);
            debug!(title = %task.title, "escalation needed but no classifier configured");
            return Resolution {
                note: format!("{below}; no LLM classifier configured, {standing}"),
                classification: keyword_classification(gate, scores),
                fallback_used: false,
            };
        };

        let text = task.description.as_str();
        if let Some(cache) = &self.cache {
            // Entries for departments that left the profile count as misses.
            let hit = cache
                .get(text)
                .filter(|v| profile.resolve(v.department.as_str()).is_some());
            self.metrics.record_cache(hit.is_some());
            if let Some(verdict) = hit {
                self.metrics.record_escalation(EscalationOutcome::Cached);
                return Resolution {
                    note: format!(
                        "{below}; cached LLM classification {} at {:.2}",
                        verdict.department, verdict.confidence
                    ),
                    classification: model_classification(verdict, ClassificationMethod::Cached, scores),
                    fallback_used: false,
                };
            }
        }

        match escalator.classify(text, profile).await {
            Ok(verdict) => {
                if let Some(cache) = &self.cache {
                    cache.insert(text, verdict.clone());
                }
                self.metrics.record_escalation(EscalationOutcome::Classified);
                Resolution {
                    note: format!(
                        "{below}; LLM classifier {} chose {} at {:.2}",
                        escalator.classifier_name(),
                        verdict.department,
                        verdict.confidence
                    ),
                    classification: model_classification(verdict, ClassificationMethod::Llm, scores),
                    fallback_used: false,
                }
            }
            Err(err) => {
                warn!(
                    title = %task.title,
                    classifier = escalator.classifier_name(),
                    error = %err,
                    "LLM classification failed, keyword result stands"
                );
                self.metrics.record_escalation(err.outcome());
                Resolution {
                    note: format!("{below}; LLM fallback ({err}), {standing}"),
                    classification: keyword_classification(gate, scores),
                    fallback_used: true,
                }
            }
        }
    }
}

fn keyword_classification(gate: &GateDecision, scores: KeywordScores) -> ClassificationResult {
    ClassificationResult {
        department: gate.department.clone(),
        confidence: gate.confidence,
        method: ClassificationMethod::Keyword,
        matched_keywords: gate.matched_keywords.clone(),
        candidates: scores.into_vec(),
    }
}

fn model_classification(
    verdict: ValidatedVerdict,
    method: ClassificationMethod,
    scores: KeywordScores,
) -> ClassificationResult {
    let matched_keywords = scores
        .iter()
        .find(|s| s.department == verdict.department)
        .map(|s| s.matched_keywords.clone())
        .unwrap_or_default();
    ClassificationResult {
        department: verdict.department,
        confidence: verdict.confidence,
        method,
        matched_keywords,
        candidates: scores.into_vec(),
    }
}

#[cfg(test)]
mod tests {
    use director_core::{DepartmentId, Strategy};
    use director_test_utils::MockClassifier;
    use tracing_test::traced_test;

    use super::*;
    use crate::metrics::InMemoryMetrics;

    fn router(metrics: Arc<InMemoryMetrics>) -> IntentRouter {
        let profile = KeywordProfile::from_config(
            &[
                DepartmentConfig::new("communications", &["email", "send", "message"]),
                DepartmentConfig::new("analysis", &["data", "report", "metrics"]),
            ],
            "general",
        )
        .unwrap();
        IntentRouter::new(profile, &RoutingConfig::default(), metrics)
    }

    fn complexity(value: u8) -> TaskComplexity {
        TaskComplexity::new(value).unwrap()
    }

    #[tokio::test]
    async fn empty_description_is_invalid() {
        let metrics = Arc::new(InMemoryMetrics::new());
        let router = router(metrics.clone());

        let err = router.route(&Task::new("   \n")).await.unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidTask {
                reason: "description is empty".into()
            }
        );
        assert_eq!(metrics.snapshot().invalid_tasks, 1);
        assert_eq!(metrics.snapshot().decisions, 0);
    }

    #[tokio::test]
    async fn confident_keyword_match_skips_escalation() {
        let metrics = Arc::new(InMemoryMetrics::new());
        let router = router(metrics.clone());

        let decision = router
            .route_with_complexity(&Task::new("send the email message"), complexity(2))
            .await
            .unwrap();
        assert_eq!(decision.strategy, Strategy::SingleAgent);
        assert_eq!(decision.target_agents, vec![DepartmentId::from("communications")]);
        assert_eq!(decision.method, ClassificationMethod::Keyword);
        assert_eq!(decision.confidence, 1.0);
        assert!(!decision.fallback_used);
        assert!(decision.reasoning.contains("met threshold"));
        assert_eq!(metrics.snapshot().escalations(), 0);
    }

    #[tokio::test]
    async fn missing_classifier_keeps_keyword_result_without_fallback_flag() {
        let metrics = Arc::new(InMemoryMetrics::new());
        let router = router(metrics.clone());

        let decision = router
            .route_with_complexity(
                &Task::new("please send an email to the team about the update"),
                complexity(2),
            )
            .await
            .unwrap();
        assert_eq!(decision.department.as_str(), "communications");
        assert!(!decision.fallback_used);
        assert!(decision.reasoning.contains("no LLM classifier configured"));
        assert_eq!(metrics.snapshot().escalations_unavailable, 1);
    }

    #[tokio::test]
    async fn no_match_routes_to_default_department() {
        let router = router(Arc::new(InMemoryMetrics::new()));
        let decision = router.route(&Task::new("xyz abc qqq")).await.unwrap();
        assert_eq!(decision.department.as_str(), "general");
        assert_eq!(decision.target_agents, vec![DepartmentId::from("general")]);
        assert_eq!(decision.confidence, 0.0);
        assert!(decision.reasoning.contains("no keyword matched"));
    }

    #[tokio::test]
    async fn reload_swaps_profile() {
        let router = router(Arc::new(InMemoryMetrics::new()));
        let replacement = KeywordProfile::from_config(
            &[DepartmentConfig::new("legal", &["contract"])],
            "general",
        )
        .unwrap();
        router.reload_profile(replacement);

        let decision = router
            .route_with_complexity(&Task::new("review this contract"), complexity(1))
            .await
            .unwrap();
        assert_eq!(decision.department.as_str(), "legal");
        assert_eq!(router.profile().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn classifier_timeout_falls_back_with_warning() {
        let metrics = Arc::new(InMemoryMetrics::new());
        let classifier = Arc::new(MockClassifier::hanging(Duration::from_secs(60)));
        let router = router(metrics.clone()).with_classifier(
            classifier.clone(),
            EscalationPolicy {
                timeout: Duration::from_secs(10),
                retry: true,
                backoff: Duration::from_millis(250),
            },
        );

        let decision = router
            .route_with_complexity(
                &Task::new("please send an email to the team about the update"),
                complexity(2),
            )
            .await
            .unwrap();

        assert!(decision.fallback_used);
        assert_eq!(decision.method, ClassificationMethod::Keyword);
        assert_eq!(decision.department.as_str(), "communications");
        assert!((decision.confidence - 2.0 / 3.0).abs() < 1e-9);
        assert!(decision.reasoning.contains("timed out"));
        assert_eq!(classifier.calls(), 2, "one attempt plus one retry");
        assert_eq!(metrics.snapshot().escalations_timed_out, 1);
        assert!(logs_contain("LLM classification failed, keyword result stands"));
    }

    #[test]
    fn route_error_converts_to_director_error() {
        let err: DirectorError = RouteError::InvalidTask {
            reason: "description is empty".into(),
        }
        .into();
        assert!(matches!(err, DirectorError::InvalidTask { .. }));
    }

    #[test]
    fn stage_names() {
        assert_eq!(RouteStage::Strategized.to_string(), "STRATEGIZED");
    }
}
