// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the pluggable edges of the router.
//!
//! Classifiers and handlers use `#[async_trait]` for dynamic dispatch
//! compatibility; metrics recording is synchronous and non-blocking.

pub mod classifier;
pub mod handler;
pub mod metrics;

pub use classifier::IntentClassifier;
pub use handler::DepartmentHandler;
pub use metrics::RoutingMetrics;
