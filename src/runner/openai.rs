//! @ai:module:intent OpenAI chat completions client
//! @ai:module:layer infrastructure
//! @ai:module:public_api OpenAiClient
//! @ai:module:stateless true

use crate::config::{ProviderConfig, RunConfig};
use crate::error::ProviderError;
use crate::runner::client::{extract_text, read_json, HttpEndpoint, ProviderClient};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const TEXT_POINTER: &str = "/choices/0/message/content";

/// @ai:intent Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// @ai:intent Client for OpenAI-compatible chat completion endpoints
pub struct OpenAiClient {
    endpoint: HttpEndpoint,
}

impl OpenAiClient {
    /// @ai:intent Create a client, reading the API key from the environment
    /// @ai:effects env
    pub fn new(config: &ProviderConfig, run: &RunConfig) -> reqwest::Result<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::from_config(config, run, DEFAULT_BASE_URL)?,
        })
    }

    pub fn with_endpoint(endpoint: HttpEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl ProviderClient for OpenAiClient {
    fn name(&self) -> &str {
        &self.endpoint.name
    }

    /// @ai:intent Send a single user message and return the first choice
    /// @ai:effects network
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.endpoint.api_key()?;

        let request = ChatRequest {
            model: &self.endpoint.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.endpoint.max_tokens,
        };

        let response = self
            .endpoint
            .client
            .post(format!("{}/chat/completions", self.endpoint.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let body = read_json(response).await?;
        extract_text(&body, TEXT_POINTER, self.endpoint.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtractionPolicy, ProviderKind};
    use crate::metrics::OutcomeStatus;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, policy: ExtractionPolicy) -> OpenAiClient {
        let run = RunConfig {
            on_missing_text: policy,
            ..Default::default()
        };
        client_with_run(server, &run)
    }

    fn client_with_run(server: &MockServer, run: &RunConfig) -> OpenAiClient {
        let config = ProviderConfig {
            name: "ChatGPT".to_string(),
            kind: ProviderKind::OpenAi,
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_tokens: 150,
            base_url: Some(server.uri()),
        };
        let endpoint =
            HttpEndpoint::with_api_key(&config, run, DEFAULT_BASE_URL, Some("test-key".into()))
                .unwrap();
        OpenAiClient::with_endpoint(endpoint)
    }

    #[tokio::test]
    async fn test_sends_chat_request_and_extracts_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 150,
                "messages": [{"role": "user", "content": "Explain Rust"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Rust is a language."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server, ExtractionPolicy::Degrade)
            .send("Explain Rust")
            .await;

        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.payload, "Rust is a language.");
        assert_eq!(outcome.provider, "ChatGPT");
    }

    #[tokio::test]
    async fn test_http_error_becomes_error_outcome() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let outcome = client_for(&server, ExtractionPolicy::Degrade)
            .send("hi")
            .await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.payload.contains("401"));
        assert!(outcome.payload.contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_unexpected_shape_respects_policy() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let degraded = client_for(&server, ExtractionPolicy::Degrade).send("hi").await;
        assert_eq!(degraded.status, OutcomeStatus::Success);
        assert_eq!(degraded.payload, "");

        let failed = client_for(&server, ExtractionPolicy::Fail).send("hi").await;
        assert_eq!(failed.status, OutcomeStatus::Error);
        assert!(failed.payload.contains("/choices/0/message/content"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server, ExtractionPolicy::Degrade).send("hi").await;
        assert_eq!(outcome.status, OutcomeStatus::Error);
    }

    async fn mount_slow_reply(server: &MockServer, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "choices": [{"message": {"role": "assistant", "content": "late"}}]
                    }))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_request_timeout_becomes_error_outcome() {
        let server = MockServer::start().await;
        mount_slow_reply(&server, Duration::from_secs(3)).await;

        let run = RunConfig {
            request_timeout_secs: 1,
            ..Default::default()
        };
        let outcome = client_with_run(&server, &run).send("hi").await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.elapsed_seconds >= 0.9, "{}", outcome.elapsed_seconds);
        assert!(outcome.elapsed_seconds < 2.5, "{}", outcome.elapsed_seconds);
    }

    #[tokio::test]
    async fn test_zero_request_timeout_waits_for_slow_reply() {
        let server = MockServer::start().await;
        mount_slow_reply(&server, Duration::from_millis(1500)).await;

        let run = RunConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        let outcome = client_with_run(&server, &run).send("hi").await;

        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.payload, "late");
        assert!(outcome.elapsed_seconds >= 1.4);
    }
}
