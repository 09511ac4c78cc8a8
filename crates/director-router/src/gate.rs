// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confidence gate: accept the keyword result or ask for escalation.

use director_core::DepartmentId;

use crate::scorer::KeywordScores;

/// Default gate threshold.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Gate verdict for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct GateDecision {
    pub department: DepartmentId,
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
    pub needs_escalation: bool,
}

/// Compares the best keyword score against a fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceGate {
    threshold: f64,
}

impl ConfidenceGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Pick the top department and decide whether it needs escalation.
    ///
    /// A score exactly at the threshold is accepted. When nothing scored,
    /// the default department is returned with zero confidence and the
    /// task is always escalated.
    pub fn decide(&self, scores: &KeywordScores, default_department: &DepartmentId) -> GateDecision {
        match scores.top() {
            Some(top) if top.score > 0.0 => GateDecision {
                department: top.department.clone(),
                confidence: top.score,
                matched_keywords: top.matched_keywords.clone(),
                needs_escalation: top.score < self.threshold,
            },
            _ => GateDecision {
                department: default_department.clone(),
                confidence: 0.0,
                matched_keywords: Vec::new(),
                needs_escalation: true,
            },
        }
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
