// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared startup: configuration, tracing, and router assembly.

use std::path::Path;
use std::sync::Arc;

use director_anthropic::AnthropicClassifier;
use director_config::{ConfigError, DirectorConfig};
use director_core::{DirectorError, IntentClassifier, RoutingMetrics};
use director_router::IntentRouter;
use tracing::{info, warn};

/// Load configuration from `path` when given, the XDG hierarchy otherwise.
pub fn load_config(path: Option<&Path>) -> Result<DirectorConfig, Vec<ConfigError>> {
    match path {
        Some(path) => director_config::load_and_validate_path(path),
        None => director_config::load_and_validate(),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "director={log_level},director_router={log_level},director_anthropic={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Build the router described by `config`.
///
/// The Anthropic classifier is created only when `llm.enabled` is set; a
/// missing API key is then a startup error.
pub fn build_router(
    config: &DirectorConfig,
    metrics: Arc<dyn RoutingMetrics>,
) -> Result<IntentRouter, DirectorError> {
    let departments = director_config::resolve_departments(config).map_err(config_failure)?;

    let classifier: Option<Arc<dyn IntentClassifier>> = if config.llm.enabled {
        Some(Arc::new(AnthropicClassifier::new(&config.llm)?))
    } else {
        None
    };

    let router = IntentRouter::from_config(config, &departments, classifier, metrics)?;
    if !router.has_classifier() {
        warn!("LLM escalation disabled; low-confidence tasks keep their keyword result");
    }
    info!(
        service = %config.service.name,
        departments = departments.len(),
        threshold = router.threshold(),
        "router ready"
    );
    Ok(router)
}

/// Render configuration diagnostics and collapse them into one error.
pub fn config_failure(errors: Vec<ConfigError>) -> DirectorError {
    director_config::render_errors(&errors);
    DirectorError::Config(format!(
        "{} configuration problem{} found",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    ))
}
