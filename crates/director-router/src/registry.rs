// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Department-to-handler registration table.

use std::collections::HashMap;
use std::sync::Arc;

use director_core::{DepartmentHandler, DepartmentId, DirectorError};
use tracing::debug;

use crate::profile::KeywordProfile;

/// Maps department ids to their handlers. Filled at startup.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<DepartmentId, Arc<dyn DepartmentHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `department`, replacing any previous one.
    pub fn register(
        &mut self,
        department: impl Into<DepartmentId>,
        handler: Arc<dyn DepartmentHandler>,
    ) -> &mut Self {
        let department = department.into();
        debug!(department = %department, "registered department handler");
        self.handlers.insert(department, handler);
        self
    }

    pub fn get(&self, department: &DepartmentId) -> Option<Arc<dyn DepartmentHandler>> {
        self.handlers.get(department).cloned()
    }

    pub fn contains(&self, department: &DepartmentId) -> bool {
        self.handlers.contains_key(department)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Check that every profiled department and the default department has a handler.
    pub fn verify(&self, profile: &KeywordProfile) -> Result<(), DirectorError> {
        let required = profile
            .departments()
            .iter()
            .map(|d| &d.id)
            .chain(std::iter::once(profile.default_department()));
        let mut missing: Vec<&str> = Vec::new();
        for id in required {
            if !self.contains(id) && !missing.contains(&id.as_str()) {
                missing.push(id.as_str());
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DirectorError::Config(format!(
                "no handler registered for: {}",
                missing.join(", ")
            )))
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut departments: Vec<&str> = self.handlers.keys().map(DepartmentId::as_str).collect();
        departments.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("departments", &departments)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use director_config::DepartmentConfig;
    use director_core::Task;

    use super::*;

    struct Echo;

    #[async_trait]
    impl DepartmentHandler for Echo {
        async fn handle(&self, task: &Task) -> Result<serde_json::Value, DirectorError> {
            Ok(serde_json::json!({ "echo": task.description }))
        }
    }

    fn profile() -> KeywordProfile {
        KeywordProfile::from_config(
            &[
                DepartmentConfig::new("communications", &["email"]),
                DepartmentConfig::new("analysis", &["data"]),
            ],
            "general",
        )
        .unwrap()
    }

    #[test]
    fn verify_passes_when_all_registered() {
        let mut registry = HandlerRegistry::new();
        registry
            .register("communications", Arc::new(Echo))
            .register("analysis", Arc::new(Echo))
            .register("general", Arc::new(Echo));
        assert!(registry.verify(&profile()).is_ok());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn verify_names_missing_departments() {
        let mut registry = HandlerRegistry::new();
        registry.register("communications", Arc::new(Echo));
        let err = registry.verify(&profile()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("analysis"));
        assert!(message.contains("general"));
        assert!(!message.contains("communications"));
    }
}
