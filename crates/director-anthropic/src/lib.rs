// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude intent classifier for the SwarmDirector router.
//!
//! This crate implements [`IntentClassifier`] over the Anthropic Messages
//! API. The model is asked to pick one department and answer with a small
//! JSON object; the router applies its own deadline around every call.

pub mod client;
pub mod types;

use async_trait::async_trait;
use director_config::LlmConfig;
use director_core::{DepartmentId, DirectorError, IntentClassifier, LlmVerdict};
use serde::Deserialize;
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

const SYSTEM_PROMPT: &str = "You route work items to departments. \
Reply with only a JSON object of the form \
{\"department\": \"<one of the listed departments>\", \"confidence\": <number between 0 and 1>}.";

/// Anthropic Claude classifier implementing [`IntentClassifier`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicClassifier {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
}

impl AnthropicClassifier {
    /// Creates a classifier from the `[llm]` configuration section.
    pub fn new(config: &LlmConfig) -> Result<Self, DirectorError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), |name| std::env::var(name).ok())?;
        let mut client = AnthropicClient::new(&api_key, &config.api_version)?;
        if let Some(url) = &config.base_url {
            client = client.with_base_url(url.as_str());
        }

        info!(
            model = config.model,
            endpoint = client.base_url(),
            "Anthropic classifier initialized"
        );

        Ok(Self::with_client(client, config.model.clone(), config.max_tokens))
    }

    /// Creates a classifier around an existing client.
    pub fn with_client(client: AnthropicClient, model: String, max_tokens: u32) -> Self {
        Self {
            client,
            model,
            max_tokens,
        }
    }

    fn to_message_request(&self, text: &str, departments: &[DepartmentId]) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage::user(classification_prompt(text, departments))],
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.max_tokens,
            temperature: Some(0.0),
        }
    }
}

#[async_trait]
impl IntentClassifier for AnthropicClassifier {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn classify(
        &self,
        text: &str,
        departments: &[DepartmentId],
    ) -> Result<LlmVerdict, DirectorError> {
        let request = self.to_message_request(text, departments);
        let response = self.client.complete_message(&request).await?;
        debug!(
            id = %response.id,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "classification completed"
        );

        let answer = response
            .first_text()
            .ok_or_else(|| DirectorError::classifier("response carried no text block"))?;
        parse_verdict(answer)
    }
}

/// User message listing the candidate departments and the task text.
fn classification_prompt(text: &str, departments: &[DepartmentId]) -> String {
    let names: Vec<&str> = departments.iter().map(DepartmentId::as_str).collect();
    format!(
        "Departments: {}\n\nTask:\n{}\n\nWhich department should handle this task?",
        names.join(", "),
        text.trim()
    )
}

#[derive(Deserialize)]
struct RawVerdict {
    department: String,
    confidence: f64,
}

/// Extract `{"department": ..., "confidence": ...}` from the model's answer.
///
/// Tolerates prose or code fences around the object by parsing the span
/// between the first `{` and the last `}`.
fn parse_verdict(answer: &str) -> Result<LlmVerdict, DirectorError> {
    let start = answer.find('{');
    let end = answer.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &answer[start..=end],
        _ => {
            return Err(DirectorError::classifier(format!(
                "no JSON object in classifier answer: {answer:?}"
            )));
        }
    };

    let raw: RawVerdict = serde_json::from_str(json).map_err(|e| DirectorError::Classifier {
        message: format!("malformed classifier answer: {e}"),
        source: Some(Box::new(e)),
    })?;
    Ok(LlmVerdict {
        department: raw.department.trim().to_string(),
        confidence: raw.confidence,
    })
}

/// Resolves the API key from config or the `ANTHROPIC_API_KEY` variable
/// looked up through `env`.
fn resolve_api_key(
    config_key: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, DirectorError> {
    if let Some(key) = config_key.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    env("ANTHROPIC_API_KEY")
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            DirectorError::Config(
                "Anthropic API key not found. Set llm.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn departments() -> Vec<DepartmentId> {
        vec![DepartmentId::from("communications"), DepartmentId::from("analysis")]
    }

    fn classifier(server: &MockServer) -> AnthropicClassifier {
        let client = AnthropicClient::new("test-api-key", "2023-06-01")
            .unwrap()
            .with_base_url(server.uri());
        AnthropicClassifier::with_client(client, "claude-haiku-4-5-20250901".into(), 64)
    }

    fn answer(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "msg_cls",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "model": "claude-haiku-4-5-20250901",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 40, "output_tokens": 12}
        }))
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        let key = resolve_api_key(Some("sk-config"), |_| Some("sk-env".into())).unwrap();
        assert_eq!(key, "sk-config");
    }

    #[test]
    fn resolve_api_key_empty_config_falls_back_to_env() {
        let key = resolve_api_key(Some(""), |name| {
            (name == "ANTHROPIC_API_KEY").then(|| "sk-env".to_string())
        })
        .unwrap();
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn resolve_api_key_missing_everywhere() {
        let err = resolve_api_key(None, |_| None).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn parse_plain_json() {
        let verdict = parse_verdict(r#"{"department": "analysis", "confidence": 0.91}"#).unwrap();
        assert_eq!(verdict.department, "analysis");
        assert_eq!(verdict.confidence, 0.91);
    }

    #[test]
    fn parse_json_inside_fence() {
        let verdict =
            parse_verdict("Sure.\n```json\n{\"department\": \" communications \", \"confidence\": 0.6}\n```")
                .unwrap();
        assert_eq!(verdict.department, "communications");
    }

    #[test]
    fn parse_rejects_prose() {
        assert!(parse_verdict("I think analysis").is_err());
        assert!(parse_verdict(r#"{"department": "analysis"}"#).is_err());
    }

    #[test]
    fn prompt_lists_departments() {
        let prompt = classification_prompt("  send the report ", &departments());
        assert!(prompt.contains("Departments: communications, analysis"));
        assert!(prompt.contains("Task:\nsend the report\n"));
    }

    #[tokio::test]
    async fn classify_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("communications, analysis"))
            .respond_with(answer(r#"{"department": "analysis", "confidence": 0.83}"#))
            .expect(1)
            .mount(&server)
            .await;

        let verdict = classifier(&server)
            .classify("compile the quarterly numbers", &departments())
            .await
            .unwrap();
        assert_eq!(verdict.department, "analysis");
        assert_eq!(verdict.confidence, 0.83);
    }

    #[tokio::test]
    async fn classify_surfaces_unparseable_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(answer("no idea, sorry"))
            .mount(&server)
            .await;

        let err = classifier(&server)
            .classify("???", &departments())
            .await
            .unwrap_err();
        assert!(matches!(err, DirectorError::Classifier { .. }));
    }

    #[test]
    fn name_is_anthropic() {
        let client = AnthropicClient::new("k", "2023-06-01").unwrap();
        let classifier = AnthropicClassifier::with_client(client, "m".into(), 16);
        assert_eq!(classifier.name(), "anthropic");
    }
}
