// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `director check-config` command implementation.

use std::fmt::Write as _;

use director_config::DirectorConfig;
use director_core::DirectorError;
use director_router::KeywordProfile;

/// Runs the `director check-config` command.
///
/// Configuration has already been loaded and validated by the time this
/// runs; this resolves the keyword profile and prints a summary.
pub fn run_check_config(config: &DirectorConfig) -> Result<(), DirectorError> {
    let departments =
        director_config::resolve_departments(config).map_err(crate::setup::config_failure)?;
    let profile = KeywordProfile::from_config(&departments, &config.routing.default_department)?;
    print!("{}", summary(config, &profile));
    Ok(())
}

fn summary(config: &DirectorConfig, profile: &KeywordProfile) -> String {
    let routing = &config.routing;
    let mut out = String::new();

    let _ = writeln!(out, "configuration OK");
    let _ = writeln!(out, "  confidence threshold:  {:.2}", routing.confidence_threshold);
    let _ = writeln!(out, "  default department:    {}", routing.default_department);
    let _ = writeln!(out, "  scatter-gather top n:  {}", routing.scatter_gather_top_n);
    if let Some(strategy) = routing.force_strategy {
        let _ = writeln!(out, "  forced strategy:       {strategy}");
    }
    let llm = if config.llm.enabled {
        format!(
            "{} (timeout {}s, retry {})",
            config.llm.model,
            config.llm.timeout_secs,
            if config.llm.retry { "on" } else { "off" }
        )
    } else {
        "disabled".to_string()
    };
    let _ = writeln!(out, "  llm escalation:        {llm}");
    let cache = if config.cache.enabled {
        format!(
            "ttl {}s, max {} entries",
            config.cache.ttl_secs, config.cache.max_entries
        )
    } else {
        "disabled".to_string()
    };
    let _ = writeln!(out, "  classification cache:  {cache}");
    let source = routing.profile_path.as_deref().unwrap_or("inline [[departments]]");
    let _ = writeln!(out, "  profile source:        {source}");

    let _ = writeln!(out);
    let width = profile
        .departments()
        .iter()
        .map(|d| d.id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("DEPARTMENT".len());
    let _ = writeln!(out, "  {:<width$}  KEYWORDS", "DEPARTMENT");
    for department in profile.departments() {
        let keywords: Vec<&str> = department.keywords.iter().map(|k| k.phrase()).collect();
        let _ = writeln!(out, "  {:<width$}  {}", department.id.as_str(), keywords.join(", "));
    }
    out
}
