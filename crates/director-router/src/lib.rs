// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and task routing for SwarmDirector.
//!
//! This crate provides:
//! - [`KeywordScorer`]: whole-token keyword scoring against a department profile
//! - [`ConfidenceGate`]: accept the keyword result or escalate to a language model
//! - [`Escalator`]: bounded language-model classification (timeout, one retry)
//! - [`StrategySelector`]: single-agent, scatter-gather, or load-balanced dispatch
//! - [`IntentRouter`]: the pipeline tying these together
//! - [`Dispatcher`]: runs a decision against registered department handlers
//!
//! The keyword phase never blocks. Escalation failures degrade to the keyword
//! result; only an invalid task is reported to the caller.

pub mod cache;
pub mod complexity;
pub mod dispatch;
pub mod escalation;
pub mod gate;
pub mod metrics;
pub mod profile;
pub mod registry;
pub mod router;
pub mod scorer;
pub mod strategy;

pub use cache::ClassificationCache;
pub use complexity::ComplexityEstimator;
pub use dispatch::{AgentOutcome, DispatchReport, Dispatcher};
pub use escalation::{ClassificationError, EscalationPolicy, Escalator, ValidatedVerdict};
pub use gate::{ConfidenceGate, GateDecision};
pub use metrics::{InMemoryMetrics, MetricsSnapshot};
pub use profile::{KeywordProfile, ProfileStore};
pub use registry::HandlerRegistry;
pub use router::{IntentRouter, RouteError, RouteStage};
pub use scorer::{KeywordScorer, KeywordScores};
pub use strategy::StrategySelector;
