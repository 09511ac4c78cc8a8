// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Anthropic classifier driven through the router's escalation policy.

use std::sync::Arc;
use std::time::Duration;

use director_anthropic::AnthropicClassifier;
use director_anthropic::client::AnthropicClient;
use director_config::DepartmentConfig;
use director_router::{EscalationPolicy, Escalator, KeywordProfile};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

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

fn escalator(server: &MockServer, retry: bool) -> Escalator {
    let client = AnthropicClient::new("test-api-key", "2023-06-01")
        .unwrap()
        .with_base_url(server.uri());
    let classifier =
        AnthropicClassifier::with_client(client, "claude-haiku-4-5-20250901".into(), 64);
    Escalator::new(
        Arc::new(classifier),
        EscalationPolicy {
            timeout: Duration::from_secs(5),
            retry,
            backoff: Duration::from_millis(10),
        },
    )
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

#[tokio::test]
async fn unavailable_api_gets_exactly_two_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let result = escalator(&server, true)
        .classify("plot the churn data", &profile())
        .await;

    assert!(result.is_err());
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn disabled_retry_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let result = escalator(&server, false)
        .classify("plot the churn data", &profile())
        .await;

    assert!(result.is_err());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn rate_limited_first_attempt_recovers_on_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "msg_cls",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "{\"department\": \"analysis\", \"confidence\": 0.8}"}],
            "model": "claude-haiku-4-5-20250901",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 40, "output_tokens": 12}
        })))
        .mount(&server)
        .await;

    let verdict = escalator(&server, true)
        .classify("plot the churn data", &profile())
        .await
        .unwrap();

    assert_eq!(verdict.department.as_str(), "analysis");
    assert_eq!(request_count(&server).await, 2);
}
