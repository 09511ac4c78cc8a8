// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express:
//! threshold ranges, positive timeouts, and a usable keyword profile.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{DepartmentConfig, DirectorConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast). The inline
/// `departments` list is only checked when no `routing.profile_path` is set;
/// the profile file is validated when it is loaded.
pub fn validate_config(config: &DirectorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{}` must be one of {}",
                config.service.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let threshold = config.routing.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!("routing.confidence_threshold must be within 0.0-1.0, got {threshold}"),
        });
    }

    if config.routing.default_department.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "routing.default_department must not be empty".to_string(),
        });
    }

    if config.routing.scatter_gather_top_n < 1 {
        errors.push(ConfigError::Validation {
            message: "routing.scatter_gather_top_n must be at least 1".to_string(),
        });
    }

    let timeout = config.llm.timeout_secs;
    if !timeout.is_finite() || timeout <= 0.0 {
        errors.push(ConfigError::Validation {
            message: format!("llm.timeout_secs must be a positive number, got {timeout}"),
        });
    }

    if config.cache.enabled {
        if config.cache.ttl_secs == 0 {
            errors.push(ConfigError::Validation {
                message: "cache.ttl_secs must be positive when the cache is enabled".to_string(),
            });
        }
        if config.cache.max_entries == 0 {
            errors.push(ConfigError::Validation {
                message: "cache.max_entries must be positive when the cache is enabled"
                    .to_string(),
            });
        }
    }

    if config.routing.profile_path.is_none() {
        errors.extend(validate_departments(&config.departments));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a keyword profile. Returns every problem found.
///
/// An empty profile, a department without usable keywords, and duplicate
/// department names are all fatal at startup.
pub fn validate_departments(departments: &[DepartmentConfig]) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if departments.is_empty() {
        errors.push(ConfigError::Validation {
            message: "keyword profile is empty: declare at least one [[departments]] entry"
                .to_string(),
        });
        return errors;
    }

    let mut seen_names = HashSet::new();
    for (i, department) in departments.iter().enumerate() {
        let name = department.name.trim();
        if name.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("departments[{i}].name must not be empty"),
            });
            continue;
        }

        if !seen_names.insert(name.to_lowercase()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate department name `{name}` in [[departments]] array"),
            });
        }

        let usable = department
            .keywords
            .iter()
            .filter(|k| k.chars().any(char::is_alphanumeric))
            .count();
        if usable == 0 {
            errors.push(ConfigError::Validation {
                message: format!("department `{name}` has no usable keywords"),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = DirectorConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn threshold_out_of_range_fails_validation() {
        let mut config = DirectorConfig::default();
        config.routing.confidence_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "confidence_threshold"));
    }

    #[test]
    fn zero_top_n_fails_validation() {
        let mut config = DirectorConfig::default();
        config.routing.scatter_gather_top_n = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "scatter_gather_top_n"));
    }

    #[test]
    fn non_positive_timeout_fails_validation() {
        let mut config = DirectorConfig::default();
        config.llm.timeout_secs = 0.0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "llm.timeout_secs"));
    }

    #[test]
    fn disabled_cache_skips_cache_checks() {
        let mut config = DirectorConfig::default();
        config.cache.enabled = false;
        config.cache.ttl_secs = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_profile_is_fatal() {
        let mut config = DirectorConfig::default();
        config.departments.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "keyword profile is empty"));
    }

    #[test]
    fn profile_path_defers_department_checks() {
        let mut config = DirectorConfig::default();
        config.departments.clear();
        config.routing.profile_path = Some("/etc/director/profile.toml".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn duplicate_department_names_fail_validation() {
        let departments = vec![
            DepartmentConfig::new("analysis", &["data"]),
            DepartmentConfig::new("Analysis", &["report"]),
        ];
        let errors = validate_departments(&departments);
        assert!(has_message(&errors, "duplicate department name"));
    }

    #[test]
    fn punctuation_only_keywords_are_unusable() {
        let departments = vec![DepartmentConfig::new("noise", &["!!!", "  "])];
        let errors = validate_departments(&departments);
        assert!(has_message(&errors, "no usable keywords"));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = DirectorConfig::default();
        config.routing.confidence_threshold = -0.1;
        config.service.log_level = "verbose".to_string();
        config.routing.default_department = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
