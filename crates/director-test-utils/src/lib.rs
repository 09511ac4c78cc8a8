// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for SwarmDirector.
//!
//! Provides scripted adapters and fixtures for fast, deterministic,
//! CI-runnable tests without a language-model endpoint.
//!
//! # Components
//!
//! - [`MockClassifier`] - Intent classifier replaying scripted answers, failures, and delays
//! - [`RecordingHandler`] - Department handler that records every task it receives
//! - [`fixtures`] - Sample keyword profiles and tasks

pub mod fixtures;
pub mod mock_classifier;
pub mod recording_handler;

pub use mock_classifier::MockClassifier;
pub use recording_handler::RecordingHandler;
