// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-token keyword scoring against a department profile.
//!
//! Pure and allocation-light: no I/O, no shared state, safe to call from any
//! number of tasks at once.

use director_core::DepartmentScore;

use crate::profile::{KeywordProfile, tokenize};

/// Scores text against every department of a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score `text` against each department.
    ///
    /// A department's score is the fraction of its distinct keywords found in
    /// the text. Phrases match as contiguous token runs, so "mail" never
    /// matches inside "email".
    pub fn score(&self, text: &str, profile: &KeywordProfile) -> KeywordScores {
        let tokens = tokenize(text);

        let scores = profile
            .departments()
            .iter()
            .map(|department| {
                let matched_keywords: Vec<String> = department
                    .keywords
                    .iter()
                    .filter(|keyword| contains_run(&tokens, keyword.tokens()))
                    .map(|keyword| keyword.phrase().to_string())
                    .collect();
                let total = department.keywords.len().max(1);
                let score = (matched_keywords.len() as f64 / total as f64).clamp(0.0, 1.0);
                DepartmentScore {
                    department: department.id.clone(),
                    score,
                    matched_keywords,
                }
            })
            .collect();

        KeywordScores { scores }
    }
}

fn contains_run(tokens: &[String], run: &[String]) -> bool {
    if run.is_empty() || run.len() > tokens.len() {
        return false;
    }
    tokens.windows(run.len()).any(|window| window == run)
}

/// Per-department scores in profile declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordScores {
    scores: Vec<DepartmentScore>,
}

impl KeywordScores {
    pub fn from_scores(scores: Vec<DepartmentScore>) -> Self {
        Self { scores }
    }

    /// Highest-scoring department; the first declared wins a tie.
    pub fn top(&self) -> Option<&DepartmentScore> {
        self.scores.iter().fold(None, |best, candidate| match best {
            Some(b) if b.score >= candidate.score => Some(b),
            _ => Some(candidate),
        })
    }

    /// Score of one department, if profiled.
    pub fn get(&self, department: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.department.as_str() == department)
            .map(|s| s.score)
    }

    pub fn all_zero(&self) -> bool {
        self.scores.iter().all(|s| s.score <= 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DepartmentScore> {
        self.scores.iter()
    }

    pub fn as_slice(&self) -> &[DepartmentScore] {
        &self.scores
    }

    pub fn into_vec(self) -> Vec<DepartmentScore> {
        self.scores
    }
}

#[cfg(test)]
mod tests {
    use director_config::DepartmentConfig;

    use super::*;

    fn profile(departments: &[(&str, &[&str])]) -> KeywordProfile {
        let config: Vec<DepartmentConfig> = departments
            .iter()
            .map(|(name, keywords)| DepartmentConfig::new(name, keywords))
            .collect();
        KeywordProfile::from_config(&config, "general").unwrap()
    }

    #[test]
    fn two_of_three_keywords_scores_two_thirds() {
        let p = profile(&[
            ("communications", &["email", "send", "message"]),
            ("analysis", &["data", "report", "metrics"]),
        ]);
        let scores =
            KeywordScorer::new().score("please send an email to the team about the update", &p);
        let top = scores.top().unwrap();
        assert_eq!(top.department.as_str(), "communications");
        assert!((top.score - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(top.matched_keywords, vec!["email", "send"]);
        assert_eq!(scores.get("analysis"), Some(0.0));
    }

    #[test]
    fn substring_does_not_match() {
        let p = profile(&[("mail", &["mail"])]);
        let scores = KeywordScorer::new().score("check my email inbox", &p);
        assert!(scores.all_zero());
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let p = profile(&[("analysis", &["data", "report"])]);
        let scores = KeywordScorer::new().score("data data data", &p);
        assert_eq!(scores.get("analysis"), Some(0.5));
    }

    #[test]
    fn phrase_matches_contiguous_tokens_only() {
        let p = profile(&[("development", &["pull request", "bug"])]);
        let scorer = KeywordScorer::new();
        assert_eq!(
            scorer.score("Review the pull-request today", &p).get("development"),
            Some(0.5)
        );
        assert_eq!(
            scorer.score("pull the latest request", &p).get("development"),
            Some(0.0)
        );
    }

    #[test]
    fn matching_ignores_case_and_punctuation() {
        let p = profile(&[("communications", &["email"])]);
        let scores = KeywordScorer::new().score("EMAIL!!!", &p);
        assert_eq!(scores.get("communications"), Some(1.0));
    }

    #[test]
    fn tie_goes_to_first_declared() {
        let p = profile(&[("first", &["alpha"]), ("second", &["alpha"])]);
        let scores = KeywordScorer::new().score("alpha", &p);
        assert_eq!(scores.top().unwrap().department.as_str(), "first");
    }

    #[test]
    fn scores_keep_declaration_order() {
        let p = profile(&[("b", &["x"]), ("a", &["y"]), ("c", &["z"])]);
        let scores = KeywordScorer::new().score("z y x", &p);
        let order: Vec<&str> = scores.iter().map(|s| s.department.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }
}
