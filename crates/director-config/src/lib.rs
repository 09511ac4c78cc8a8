// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the SwarmDirector intent router.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, keyword profile
//! loading, and miette diagnostic rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use director_config::{load_and_validate, resolve_departments};
//!
//! let config = load_and_validate().expect("config errors");
//! let departments = resolve_departments(&config).expect("profile errors");
//! println!("threshold {} over {} departments", config.routing.confidence_threshold, departments.len());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str, load_profile_file};
pub use model::{
    CacheConfig, DepartmentConfig, DirectorConfig, LlmConfig, RoutingConfig, ServiceConfig,
};

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a Figment error the failure is converted into miette diagnostics with
/// typo suggestions; otherwise semantic validation runs and every problem is
/// reported at once.
pub fn load_and_validate() -> Result<DirectorConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<DirectorConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<DirectorConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![(
                diagnostic::INLINE_SOURCE.to_string(),
                toml_content.to_string(),
            )];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load and validate a stand-alone keyword profile file.
pub fn load_profile(path: &Path) -> Result<Vec<DepartmentConfig>, Vec<ConfigError>> {
    let departments =
        loader::load_profile_file(path).map_err(|e| vec![diagnostic::profile_error(path, e)])?;
    let errors = validation::validate_departments(&departments);
    if errors.is_empty() {
        Ok(departments)
    } else {
        Err(errors)
    }
}

/// The keyword profile in effect: the profile file when `routing.profile_path`
/// is set, the inline `[[departments]]` otherwise.
pub fn resolve_departments(config: &DirectorConfig) -> Result<Vec<DepartmentConfig>, Vec<ConfigError>> {
    match &config.routing.profile_path {
        Some(path) => load_profile(Path::new(path)),
        None => Ok(config.departments.clone()),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("director.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("director.toml").display().to_string())
            .unwrap_or_else(|_| "director.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("director/director.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = Path::new("/etc/director/director.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
