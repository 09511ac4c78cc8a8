// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./director.toml` > `~/.config/director/director.toml`
//! > `/etc/director/director.toml`, with `DIRECTOR_*` environment overrides and
//! the bare deployment variables (`CONFIDENCE_THRESHOLD`, `LLM_TIMEOUT_SECONDS`, ...).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::{DepartmentConfig, DirectorConfig, ProfileFile};

/// Bare environment variables recognized without the `DIRECTOR_` prefix.
const DEPLOYMENT_VARS: &[&str] = &[
    "CONFIDENCE_THRESHOLD",
    "LLM_TIMEOUT_SECONDS",
    "DEFAULT_DEPARTMENT",
    "SCATTER_GATHER_TOP_N",
    "CLASSIFICATION_CACHE_TTL_SECONDS",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/director/director.toml` (system-wide)
/// 3. `~/.config/director/director.toml` (user XDG config)
/// 4. `./director.toml` (local directory)
/// 5. `DIRECTOR_*` environment variables
/// 6. Bare deployment variables
pub fn load_config() -> Result<DirectorConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<DirectorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DirectorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DirectorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DirectorConfig::default()))
        .merge(Toml::file(path))
        .merge(prefixed_env())
        .merge(deployment_env())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DirectorConfig::default()))
        .merge(Toml::file("/etc/director/director.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("director/director.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("director.toml"))
        .merge(prefixed_env())
        .merge(deployment_env())
}

/// Parse a stand-alone keyword profile file (`[[departments]]` tables).
///
/// Unlike the config layers, a missing profile file is an error.
pub fn load_profile_file(path: &Path) -> Result<Vec<DepartmentConfig>, figment::Error> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        figment::Error::from(format!("cannot read profile {}: {e}", path.display()))
    })?;
    let profile: ProfileFile = Figment::from(Toml::string(&content)).extract()?;
    Ok(profile.departments)
}

/// `DIRECTOR_*` variables, mapped section-first.
///
/// Keys reach `map()` in their original case, so they are lowercased first.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `DIRECTOR_ROUTING_DEFAULT_DEPARTMENT` must map to
/// `routing.default_department`.
fn prefixed_env() -> Env {
    Env::prefixed("DIRECTOR_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("service_", "service.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("llm_", "llm.", 1)
            .replacen("cache_", "cache.", 1);
        mapped.into()
    })
}

/// Unprefixed deployment variables mapped onto their config keys.
fn deployment_env() -> Env {
    Env::raw().only(DEPLOYMENT_VARS).map(|key| {
        let lowered = key.as_str().to_ascii_lowercase();
        match lowered.as_str() {
            "confidence_threshold" => "routing.confidence_threshold",
            "llm_timeout_seconds" => "llm.timeout_secs",
            "default_department" => "routing.default_department",
            "scatter_gather_top_n" => "routing.scatter_gather_top_n",
            "classification_cache_ttl_seconds" => "cache.ttl_secs",
            other => other,
        }
        .to_string()
        .into()
    })
}
