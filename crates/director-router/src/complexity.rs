// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic task complexity estimation.
//!
//! Rates a task description on the 1-10 scale used by strategy selection
//! from cheap text signals. No model call, no network.

use std::collections::HashSet;
use std::sync::LazyLock;

use director_core::TaskComplexity;
use regex::Regex;
use tracing::debug;

use crate::profile::tokenize;

/// Verbs that each name a separate unit of work.
const ACTION_VERBS: &[&str] = &[
    "analyze", "build", "compare", "coordinate", "create", "deploy", "design", "draft",
    "evaluate", "forecast", "implement", "integrate", "investigate", "migrate", "notify",
    "optimize", "plan", "prepare", "refactor", "review", "schedule", "send", "summarize",
    "test", "update", "write",
];

/// Tokens that chain one request onto another.
const CHAIN_WORDS: &[&str] = &["then", "also", "additionally", "afterwards", "finally"];

/// Phrases signalling breadth (contains, on normalized text).
const BREADTH_INDICATORS: &[&str] = &[
    "step by step", "end to end", "in depth", "comprehensive", "across all",
    "every department", "multiple teams", "company wide",
];

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:\d+[.)]|[-*])\s+\S").expect("list item pattern is valid")
});

/// Estimates task complexity from the description text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityEstimator;

impl ComplexityEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Rate `text` on the 1-10 scale. Empty text rates 1.
    pub fn estimate(&self, text: &str) -> TaskComplexity {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TaskComplexity::saturating(1);
        }

        let tokens = tokenize(trimmed);
        let normalized = tokens.join(" ");
        let mut score: i64 = 1;

        // Signal 1: length
        let length = Self::length_score(tokens.len());
        score += length;

        // Signal 2: distinct units of work
        let verbs: HashSet<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| ACTION_VERBS.contains(t))
            .collect();
        let verb_score = (verbs.len() as i64 - 1).clamp(0, 3);
        score += verb_score;

        // Signal 3: sentences
        let sentences = Self::count_sentences(trimmed);
        let sentence_score = match sentences {
            0..=2 => 0,
            3..=5 => 1,
            _ => 2,
        };
        score += sentence_score;

        // Signal 4: code fences
        if trimmed.contains("```") {
            score += 2;
        }

        // Signal 5: enumerated steps
        let list_items = LIST_ITEM.find_iter(trimmed).count();
        let list_score = match list_items {
            0..=1 => 0,
            2..=3 => 1,
            _ => 2,
        };
        score += list_score;

        // Signal 6: chained requests
        let chains = tokens
            .iter()
            .filter(|t| CHAIN_WORDS.contains(&t.as_str()))
            .count() as i64;
        score += chains.min(2);

        // Signal 7: breadth
        if BREADTH_INDICATORS.iter().any(|p| normalized.contains(p)) {
            score += 1;
        }

        let complexity = TaskComplexity::saturating(score);
        debug!(
            words = tokens.len(),
            verbs = verbs.len(),
            sentences,
            list_items,
            chains,
            complexity = complexity.get(),
            "estimated task complexity"
        );
        complexity
    }

    fn length_score(word_count: usize) -> i64 {
        match word_count {
            0..=8 => 0,
            9..=25 => 1,
            26..=60 => 2,
            61..=120 => 3,
            _ => 4,
        }
    }

    fn count_sentences(text: &str) -> usize {
        text.split(['.', '?', '!'])
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count()
    }
}
