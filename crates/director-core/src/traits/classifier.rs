// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model classifier trait used for low-confidence escalation.

use async_trait::async_trait;

use crate::error::DirectorError;
use crate::types::{DepartmentId, LlmVerdict};

/// Adapter for an external language-model intent classifier.
///
/// Implementations may block on the network for as long as they like; the
/// router wraps every call in its own timeout and treats any error as a
/// soft failure.
#[async_trait]
pub trait IntentClassifier: Send + Sync + 'static {
    /// Returns the human-readable name of this classifier.
    fn name(&self) -> &str;

    /// Classifies `text` into one of `departments`.
    async fn classify(
        &self,
        text: &str,
        departments: &[DepartmentId],
    ) -> Result<LlmVerdict, DirectorError>;
}
