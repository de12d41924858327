//! @ai:module:intent Common provider client capability and shared HTTP plumbing
//! @ai:module:layer infrastructure
//! @ai:module:public_api ProviderClient, HttpEndpoint, MockProviderClient
//! @ai:module:stateless false

use crate::config::{ExtractionPolicy, ProviderConfig, RunConfig};
use crate::error::ProviderError;
use crate::metrics::Outcome;
use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};

/// @ai:intent Capability shared by every AI text-generation provider
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// @ai:intent Display name used to key outcomes
    fn name(&self) -> &str;

    /// @ai:intent Send the prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// @ai:intent Time a generation call and fold any failure into the outcome
    /// @ai:post Always returns an Outcome; elapsed time covers send to resolution
    /// @ai:effects network, time
    async fn send(&self, prompt: &str) -> Outcome {
        let start = Instant::now();
        let result = self.generate(prompt).await;
        let elapsed = start.elapsed().as_secs_f64();

        match result {
            Ok(text) => {
                tracing::debug!("{} responded in {:.2}s", self.name(), elapsed);
                Outcome::success(self.name(), text, elapsed)
            }
            Err(e) => {
                tracing::warn!("{} failed after {:.2}s: {}", self.name(), elapsed, e);
                Outcome::error(self.name(), e.to_string(), elapsed)
            }
        }
    }
}

/// @ai:intent Connection settings shared by the HTTP provider clients
pub struct HttpEndpoint {
    pub client: reqwest::Client,
    pub name: String,
    pub model: String,
    pub max_tokens: u32,
    pub base_url: String,
    pub policy: ExtractionPolicy,
    api_key_env: String,
    api_key: Option<String>,
}

impl HttpEndpoint {
    /// @ai:intent Build endpoint settings, reading the API key from the environment
    /// @ai:effects env
    pub fn from_config(
        config: &ProviderConfig,
        run: &RunConfig,
        default_base_url: &str,
    ) -> reqwest::Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty());

        if api_key.is_none() {
            tracing::warn!(
                "{} is not set; calls to {} will fail",
                config.api_key_env,
                config.name
            );
        }

        Self::with_api_key(config, run, default_base_url, api_key)
    }

    /// @ai:intent Build endpoint settings with an explicit key (for testing)
    /// @ai:effects pure
    pub fn with_api_key(
        config: &ProviderConfig,
        run: &RunConfig,
        default_base_url: &str,
        api_key: Option<String>,
    ) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = run.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(default_base_url)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: builder.build()?,
            name: config.name.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            base_url,
            policy: run.on_missing_text,
            api_key_env: config.api_key_env.clone(),
            api_key,
        })
    }

    /// @ai:intent Get the API key or fail the call
    /// @ai:effects pure
    pub fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey(self.api_key_env.clone()))
    }
}

/// @ai:intent Check the HTTP status and decode the JSON body
/// @ai:effects network
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, ProviderError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

/// @ai:intent Pull generated text out of a response body by JSON pointer
/// @ai:post Missing text yields "" under Degrade and MissingField under Fail
/// @ai:effects pure
pub(crate) fn extract_text(
    body: &Value,
    pointer: &str,
    policy: ExtractionPolicy,
) -> Result<String, ProviderError> {
    match body.pointer(pointer).and_then(Value::as_str) {
        Some(text) => Ok(text.to_string()),
        None => match policy {
            ExtractionPolicy::Degrade => {
                tracing::debug!("Response has no text at {}; using empty string", pointer);
                Ok(String::new())
            }
            ExtractionPolicy::Fail => Err(ProviderError::MissingField(pointer.to_string())),
        },
    }
}

/// @ai:intent Mock client for testing and dry runs
pub struct MockProviderClient {
    name: String,
    response: String,
    delay: Duration,
    fail: bool,
}

impl MockProviderClient {
    /// @ai:intent Create a mock client that returns a fixed response
    /// @ai:effects pure
    pub fn new(name: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: response.into(),
            delay: Duration::ZERO,
            fail: false,
        }
    }

    /// @ai:intent Create a mock client whose calls always fail with the given message
    /// @ai:effects pure
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::new(name, message)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ProviderClient for MockProviderClient {
    fn name(&self) -> &str {
        &self.name
    }

    /// @ai:intent Return mock response after the configured delay
    /// @ai:effects time
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail {
            return Err(ProviderError::Status {
                status: 500,
                body: self.response.clone(),
            });
        }

        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;
    use crate::metrics::OutcomeStatus;
    use serde_json::json;

    fn provider_config() -> ProviderConfig {
        ProviderConfig {
            name: "Test".to_string(),
            kind: ProviderKind::OpenAi,
            model: "test-model".to_string(),
            api_key_env: "AI_COMPARE_TEST_UNSET_KEY".to_string(),
            max_tokens: 10,
            base_url: Some("http://localhost:9999/v1/".to_string()),
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let client = MockProviderClient::new("Mock", "hello");
        let outcome = client.send("prompt").await;

        assert_eq!(outcome.provider, "Mock");
        assert_eq!(outcome.payload, "hello");
        assert_eq!(outcome.status, OutcomeStatus::Success);
    }

    #[tokio::test]
    async fn test_failure_still_measures_time() {
        let client =
            MockProviderClient::failing("Mock", "overloaded").with_delay(Duration::from_millis(50));
        let outcome = client.send("prompt").await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.payload.contains("overloaded"));
        assert!(outcome.elapsed_seconds >= 0.05);
    }

    #[test]
    fn test_extract_text_present() {
        let body = json!({"choices": [{"message": {"content": "hi"}}]});
        let text = extract_text(&body, "/choices/0/message/content", ExtractionPolicy::Fail);
        assert_eq!(text.unwrap(), "hi");
    }

    #[test]
    fn test_extract_text_missing_degrades() {
        let body = json!({"choices": []});
        let text = extract_text(&body, "/choices/0/message/content", ExtractionPolicy::Degrade);
        assert_eq!(text.unwrap(), "");
    }

    #[test]
    fn test_extract_text_missing_fails() {
        let body = json!({"error": "nope"});
        let err = extract_text(&body, "/content/0/text", ExtractionPolicy::Fail).unwrap_err();
        assert!(matches!(err, ProviderError::MissingField(ref p) if p == "/content/0/text"));
    }

    #[test]
    fn test_endpoint_trims_base_url_and_reports_missing_key() {
        let endpoint =
            HttpEndpoint::with_api_key(&provider_config(), &RunConfig::default(), "unused", None)
                .unwrap();

        assert_eq!(endpoint.base_url, "http://localhost:9999/v1");
        let err = endpoint.api_key().unwrap_err();
        assert!(err.to_string().contains("AI_COMPARE_TEST_UNSET_KEY"));
    }
}
