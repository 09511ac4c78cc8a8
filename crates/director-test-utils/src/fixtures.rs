// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared keyword profiles and configuration for tests.

use director_config::{DepartmentConfig, DirectorConfig};

/// Two departments with three keywords each.
pub fn two_department_profile() -> Vec<DepartmentConfig> {
    vec![
        DepartmentConfig::new("communications", &["email", "send", "message"]),
        DepartmentConfig::new("analysis", &["data", "report", "metrics"]),
    ]
}

/// Four departments mirroring the compiled-in default profile, with a
/// multi-word phrase in development.
pub fn four_department_profile() -> Vec<DepartmentConfig> {
    vec![
        DepartmentConfig::new("communications", &["email", "send", "message", "notify"]),
        DepartmentConfig::new("analysis", &["data", "report", "metrics", "trend"]),
        DepartmentConfig::new("development", &["code", "bug", "deploy", "pull request"]),
        DepartmentConfig::new("operations", &["schedule", "invoice", "vendor", "meeting"]),
    ]
}

/// Default configuration with the language model and cache switched on and
/// a one-second classification timeout.
pub fn escalating_config() -> DirectorConfig {
    let mut config = DirectorConfig::default();
    config.llm.enabled = true;
    config.llm.timeout_secs = 1.0;
    config.llm.retry_backoff_ms = 100;
    config.cache.enabled = true;
    config.departments = two_department_profile();
    config
}
