// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded language-model escalation: timeout, one retry, label validation.
//!
//! Every failure here is soft. The router turns a [`ClassificationError`]
//! into a keyword fallback and never lets it cross its boundary.

use std::sync::Arc;
use std::time::Duration;

use director_config::LlmConfig;
use director_core::{DepartmentId, DirectorError, EscalationOutcome, IntentClassifier, LlmVerdict};
use thiserror::Error;
use tracing::{debug, warn};

use crate::profile::KeywordProfile;

/// A model answer that names a known department with a usable confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVerdict {
    pub department: DepartmentId,
    pub confidence: f64,
}

/// Why an escalation produced no usable classification.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("classification timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error(transparent)]
    Classifier(#[from] DirectorError),

    #[error("classifier answered unknown department `{label}`")]
    UnknownDepartment { label: String },

    #[error("classifier answered non-finite confidence")]
    InvalidConfidence,
}

impl ClassificationError {
    /// Metrics outcome for this failure.
    pub fn outcome(&self) -> EscalationOutcome {
        match self {
            ClassificationError::Timeout { .. } => EscalationOutcome::TimedOut,
            _ => EscalationOutcome::Failed,
        }
    }
}

/// Timeout and retry settings for escalation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationPolicy {
    /// Deadline of the first attempt. The retry gets twice this.
    pub timeout: Duration,
    pub retry: bool,
    pub backoff: Duration,
}

impl EscalationPolicy {
    pub fn from_config(config: &LlmConfig) -> Self {
        let defaults = Self::default();
        Self {
            timeout: Duration::try_from_secs_f64(config.timeout_secs)
                .ok()
                .filter(|t| !t.is_zero())
                .unwrap_or(defaults.timeout),
            retry: config.retry,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Number of attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        if self.retry { 2 } else { 1 }
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retry: true,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Calls the classifier under the escalation policy.
#[derive(Clone)]
pub struct Escalator {
    classifier: Arc<dyn IntentClassifier>,
    policy: EscalationPolicy,
}

impl Escalator {
    pub fn new(classifier: Arc<dyn IntentClassifier>, policy: EscalationPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    /// Classify `text` into one of the profile's departments.
    ///
    /// Makes at most two attempts; the second waits for the backoff and runs
    /// under a doubled deadline. Returns the last error when both fail.
    pub async fn classify(
        &self,
        text: &str,
        profile: &KeywordProfile,
    ) -> Result<ValidatedVerdict, ClassificationError> {
        let departments = profile.department_ids();
        let max_attempts = self.policy.max_attempts();
        let mut deadline = self.policy.timeout;
        let mut attempt = 1;

        loop {
            match self.attempt(text, &departments, profile, deadline).await {
                Ok(verdict) => {
                    debug!(
                        classifier = self.classifier.name(),
                        attempt,
                        department = %verdict.department,
                        confidence = verdict.confidence,
                        "classifier answered"
                    );
                    return Ok(verdict);
                }
                Err(err) if attempt < max_attempts => {
                    warn!(
                        classifier = self.classifier.name(),
                        attempt,
                        error = %err,
                        backoff_ms = self.policy.backoff.as_millis() as u64,
                        "classification attempt failed, retrying"
                    );
                    tokio::time::sleep(self.policy.backoff).await;
                    deadline = deadline.saturating_mul(2);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn attempt(
        &self,
        text: &str,
        departments: &[DepartmentId],
        profile: &KeywordProfile,
        deadline: Duration,
    ) -> Result<ValidatedVerdict, ClassificationError> {
        let verdict = tokio::time::timeout(deadline, self.classifier.classify(text, departments))
            .await
            .map_err(|_elapsed| ClassificationError::Timeout { timeout: deadline })??;
        validate(verdict, profile)
    }
}

impl std::fmt::Debug for Escalator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Escalator")
            .field("classifier", &self.classifier.name())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Accept a verdict only for a known department and a finite confidence.
fn validate(verdict: LlmVerdict, profile: &KeywordProfile) -> Result<ValidatedVerdict, ClassificationError> {
    if !verdict.confidence.is_finite() {
        return Err(ClassificationError::InvalidConfidence);
    }
    let department = profile
        .resolve(&verdict.department)
        .ok_or(ClassificationError::UnknownDepartment {
            label: verdict.department,
        })?;
    Ok(ValidatedVerdict {
        department,
        confidence: verdict.confidence.clamp(0.0, 1.0),
    })
}
