// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the SwarmDirector intent router.

use thiserror::Error;

/// The primary error type used across director adapter traits and core operations.
#[derive(Debug, Error)]
pub enum DirectorError {
    /// Configuration errors (empty keyword profile, bad thresholds, missing handlers).
    #[error("configuration error: {0}")]
    Config(String),

    /// The submitted task cannot be routed (e.g. empty description).
    #[error("invalid task: {reason}")]
    InvalidTask { reason: String },

    /// LLM classifier errors (transport failure, unparseable answer, unknown label).
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A department handler failed while processing a dispatched task.
    #[error("handler `{department}` failed: {message}")]
    Handler { department: String, message: String },

    /// No handler is registered for the requested department.
    #[error("no handler registered for department `{department}`")]
    HandlerNotFound { department: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DirectorError {
    /// Shorthand for a classifier error without an underlying source.
    pub fn classifier(message: impl Into<String>) -> Self {
        DirectorError::Classifier {
            message: message.into(),
            source: None,
        }
    }
}
