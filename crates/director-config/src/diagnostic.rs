// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Turns Figment deserialization failures into miette diagnostics that point
//! at the offending key in `director.toml` (including keys inside the n-th
//! `[[departments]]` table) and suggest the closest valid key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Source name used for configuration passed as a string.
pub const INLINE_SOURCE: &str = "<inline>";

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(director::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source file content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(director::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(director::config::missing_key),
        help("add `{key} = <value>` to the section in director.toml")
    )]
    MissingKey { key: String },

    /// A semantic validation failure (ranges, empty profile, duplicates).
    #[error("validation error: {message}")]
    #[diagnostic(code(director::config::validation))]
    Validation { message: String },

    /// The stand-alone keyword profile file could not be loaded.
    #[error("keyword profile `{path}`: {message}")]
    #[diagnostic(
        code(director::config::profile),
        help("the file must contain one or more [[departments]] tables with `name` and `keywords`")
    )]
    Profile { path: String, message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(director::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may chain several failures; each becomes one diagnostic.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = find_source_span(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: dotted_key(&error.path, field),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
                span: None,
                src: None,
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Wrap a profile-file load failure for a given path.
pub fn profile_error(path: &std::path::Path, err: figment::Error) -> ConfigError {
    ConfigError::Profile {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn dotted_key(path: &[String], field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", path.join("."))
    }
}

fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // String-backed providers carry no file path; use the inline source then.
    let source = match source_path {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None => toml_sources.iter().find(|(p, _)| p == INLINE_SOURCE),
    }
    .map(|(p, content)| (p.as_str(), content.as_str()));

    match source {
        Some((path, content)) => match find_key_offset(content, &error.path, field) {
            Some(offset) => (
                Some(SourceSpan::new(offset.into(), field.len())),
                Some(NamedSource::new(path, content.to_string())),
            ),
            None => (None, None),
        },
        None => (None, None),
    }
}

/// Find the byte offset of `field` in TOML `content` under a section path.
///
/// `["routing"]` searches after the `[routing]` header. `["departments", "2"]`
/// searches after the third `[[departments]]` header. An empty path searches
/// from the start of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path {
        [] => 0,
        [section, index, ..] if index.parse::<usize>().is_ok() => {
            let header = format!("[[{section}]]");
            let nth = index.parse::<usize>().ok()?;
            let (pos, _) = content.match_indices(&header).nth(nth)?;
            pos + header.len()
        }
        [section, ..] => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    let mut byte_offset = search_start;
    for line in content[search_start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') && byte_offset != search_start {
            // Reached the next table without finding the key.
            return None;
        }
        if let Some(after) = trimmed.strip_prefix(field) {
            if after.starts_with([' ', '=', '\t']) {
                return Some(byte_offset + (line.len() - trimmed.len()));
            }
        }
        byte_offset += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_threshold_for_typo() {
        let valid = &["confidence_threshold", "default_department", "scatter_gather_top_n"];
        assert_eq!(
            suggest_key("confidence_treshold", valid),
            Some("confidence_threshold".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["enabled", "ttl_secs", "max_entries"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn finds_key_in_named_section() {
        let content = "[service]\nname = \"d\"\n\n[routing]\ntreshold = 0.5\n";
        let path = vec!["routing".to_string()];
        let o = find_key_offset(content, &path, "treshold").unwrap();
        assert_eq!(&content[o..o + 8], "treshold");
    }

    #[test]
    fn finds_key_in_nth_array_table() {
        let content = "[[departments]]\nname = \"a\"\nkeywords = []\n\n[[departments]]\nname = \"b\"\nkeyword = []\n";
        let path = vec!["departments".to_string(), "1".to_string()];
        let o = find_key_offset(content, &path, "keyword").unwrap();
        assert_eq!(&content[o..o + 7], "keyword");
        assert!(o > content.find("name = \"b\"").unwrap());
    }

    #[test]
    fn stops_at_next_table() {
        let content = "[routing]\nconfidence_threshold = 0.5\n[cache]\nstray = 1\n";
        let path = vec!["routing".to_string()];
        assert_eq!(find_key_offset(content, &path, "stray"), None);
    }
}
