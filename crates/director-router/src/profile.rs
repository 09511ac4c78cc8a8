// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalized keyword profile and the atomically swappable store holding it.

use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use director_config::DepartmentConfig;
use director_core::{DepartmentId, DirectorError};

/// Split text into lowercase tokens on whitespace and punctuation.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Normalized form of `text`: its tokens joined by single spaces.
pub fn normalize(text: &str) -> String {
    tokenize(text).join(" ")
}

/// A keyword or phrase, stored as its token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    phrase: String,
    tokens: Vec<String>,
}

impl Keyword {
    /// Returns `None` when `raw` has no alphanumeric content.
    pub fn parse(raw: &str) -> Option<Self> {
        let tokens = tokenize(raw);
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            phrase: tokens.join(" "),
            tokens,
        })
    }

    /// Normalized phrase, e.g. `"pull request"`.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// One department with its deduplicated keywords in declaration order.
#[derive(Debug, Clone)]
pub struct ProfiledDepartment {
    pub id: DepartmentId,
    pub keywords: Vec<Keyword>,
}

/// Department keyword sets in declaration order, plus the default department.
///
/// Built once and never mutated; a reload builds a new profile and swaps it in.
#[derive(Debug, Clone)]
pub struct KeywordProfile {
    departments: Vec<ProfiledDepartment>,
    default_department: DepartmentId,
}

impl KeywordProfile {
    /// Normalize a configured profile.
    ///
    /// Fails on an empty profile, a duplicate department name, or a department
    /// whose keywords all normalize to nothing.
    pub fn from_config(
        departments: &[DepartmentConfig],
        default_department: &str,
    ) -> Result<Self, DirectorError> {
        if departments.is_empty() {
            return Err(DirectorError::Config("keyword profile is empty".into()));
        }
        let default_department = default_department.trim();
        if default_department.is_empty() {
            return Err(DirectorError::Config(
                "default department must not be empty".into(),
            ));
        }

        let mut names = HashSet::new();
        let mut profiled = Vec::with_capacity(departments.len());
        for department in departments {
            let name = department.name.trim();
            if name.is_empty() {
                return Err(DirectorError::Config("department name must not be empty".into()));
            }
            if !names.insert(name.to_lowercase()) {
                return Err(DirectorError::Config(format!(
                    "duplicate department name `{name}`"
                )));
            }

            let mut seen = HashSet::new();
            let keywords: Vec<Keyword> = department
                .keywords
                .iter()
                .filter_map(|raw| Keyword::parse(raw))
                .filter(|k| seen.insert(k.phrase.clone()))
                .collect();
            if keywords.is_empty() {
                return Err(DirectorError::Config(format!(
                    "department `{name}` has no usable keywords"
                )));
            }

            profiled.push(ProfiledDepartment {
                id: DepartmentId::from(name),
                keywords,
            });
        }

        Ok(Self {
            departments: profiled,
            default_department: DepartmentId::from(default_department),
        })
    }

    pub fn departments(&self) -> &[ProfiledDepartment] {
        &self.departments
    }

    pub fn default_department(&self) -> &DepartmentId {
        &self.default_department
    }

    /// Profiled department ids in declaration order.
    pub fn department_ids(&self) -> Vec<DepartmentId> {
        self.departments.iter().map(|d| d.id.clone()).collect()
    }

    /// Resolve a department label case-insensitively, accepting the default.
    pub fn resolve(&self, label: &str) -> Option<DepartmentId> {
        let label = label.trim();
        if label.eq_ignore_ascii_case(self.default_department.as_str()) {
            return Some(self.default_department.clone());
        }
        self.departments
            .iter()
            .find(|d| d.id.as_str().eq_ignore_ascii_case(label))
            .map(|d| d.id.clone())
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

/// Holder of the active profile. Readers take a snapshot; reloads swap the
/// whole profile in one pointer store.
#[derive(Debug)]
pub struct ProfileStore {
    current: ArcSwap<KeywordProfile>,
}

impl ProfileStore {
    pub fn new(profile: KeywordProfile) -> Self {
        Self {
            current: ArcSwap::from_pointee(profile),
        }
    }

    /// Snapshot of the active profile.
    pub fn load(&self) -> Arc<KeywordProfile> {
        self.current.load_full()
    }

    /// Replace the active profile, returning the previous one.
    pub fn swap(&self, profile: KeywordProfile) -> Arc<KeywordProfile> {
        self.current.swap(Arc::new(profile))
    }
}
