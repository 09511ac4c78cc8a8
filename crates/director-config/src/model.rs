// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the SwarmDirector router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use director_core::Strategy;
use serde::{Deserialize, Serialize};

/// Top-level director configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DirectorConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Gate threshold, default department, and strategy settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Language-model escalation settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Classification cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Keyword profile, in declaration order. Ignored when
    /// `routing.profile_path` points at a separate profile file.
    #[serde(default = "default_departments")]
    pub departments: Vec<DepartmentConfig>,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            routing: RoutingConfig::default(),
            llm: LlmConfig::default(),
            cache: CacheConfig::default(),
            departments: default_departments(),
        }
    }
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name used in logs.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "director".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Routing behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Keyword confidence below this value escalates to the LLM (0.0-1.0).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Department used when no keyword matches anything.
    #[serde(default = "default_department")]
    pub default_department: String,

    /// Number of departments queried under scatter-gather.
    #[serde(default = "default_scatter_gather_top_n")]
    pub scatter_gather_top_n: usize,

    /// Pin every decision to one strategy, bypassing the decision table.
    #[serde(default)]
    pub force_strategy: Option<Strategy>,

    /// Optional TOML file holding `[[departments]]`; enables hot reload.
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            default_department: default_department(),
            scatter_gather_top_n: default_scatter_gather_top_n(),
            force_strategy: None,
            profile_path: None,
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.7
}

fn default_department() -> String {
    "general".to_string()
}

fn default_scatter_gather_top_n() -> usize {
    2
}

/// Language-model classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Enable LLM escalation. When false, low-confidence tasks keep the keyword result.
    #[serde(default)]
    pub enabled: bool,

    /// Anthropic API key. `None` falls back to `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for classification.
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Override for the Messages API endpoint.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-attempt timeout in seconds. The retry uses twice this value.
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: f64,

    /// Allow one retry after a failed or timed-out attempt.
    #[serde(default = "default_retry")]
    pub retry: bool,

    /// Pause before the retry, in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Maximum tokens for the classification answer.
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: default_llm_model(),
            api_version: default_api_version(),
            base_url: None,
            timeout_secs: default_llm_timeout_secs(),
            retry: default_retry(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_tokens: default_llm_max_tokens(),
        }
    }
}

fn default_llm_model() -> String {
    "claude-haiku-4-5-20250901".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_llm_timeout_secs() -> f64 {
    10.0
}

fn default_retry() -> bool {
    true
}

fn default_retry_backoff_ms() -> u64 {
    250
}

fn default_llm_max_tokens() -> u32 {
    128
}

/// Classification cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Cache LLM classifications by normalized text hash.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Entry lifetime in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Upper bound on stored entries.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl_secs(),
            max_entries: default_cache_max_entries(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    86_400 // 24 hours
}

fn default_cache_max_entries() -> usize {
    10_000
}

/// One department of the keyword profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DepartmentConfig {
    /// Department identifier (e.g. "communications").
    pub name: String,

    /// Keywords or short phrases that indicate this department.
    pub keywords: Vec<String>,
}

impl DepartmentConfig {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Stand-alone profile file layout (`routing.profile_path`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileFile {
    pub departments: Vec<DepartmentConfig>,
}

fn default_departments() -> Vec<DepartmentConfig> {
    vec![
        DepartmentConfig::new(
            "communications",
            &["email", "send", "message", "notify", "announce", "newsletter"],
        ),
        DepartmentConfig::new(
            "analysis",
            &["data", "report", "metrics", "analyze", "trend", "forecast"],
        ),
        DepartmentConfig::new(
            "development",
            &["code", "bug", "deploy", "build", "refactor", "test"],
        ),
        DepartmentConfig::new(
            "operations",
            &["schedule", "invoice", "inventory", "vendor", "meeting", "onboard"],
        ),
    ]
}
