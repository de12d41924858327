//! @ai:module:intent Anthropic messages API client
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnthropicClient
//! @ai:module:stateless true

use crate::config::{ProviderConfig, RunConfig};
use crate::error::ProviderError;
use crate::runner::client::{extract_text, read_json, HttpEndpoint, ProviderClient};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const TEXT_POINTER: &str = "/content/0/text";

/// @ai:intent Messages API request body
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// @ai:intent Client for the Anthropic messages endpoint
pub struct AnthropicClient {
    endpoint: HttpEndpoint,
}

impl AnthropicClient {
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
impl ProviderClient for AnthropicClient {
    fn name(&self) -> &str {
        &self.endpoint.name
    }

    /// @ai:intent Send a single user message and return the first content block
    /// @ai:effects network
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.endpoint.api_key()?;

        let request = ApiRequest {
            model: &self.endpoint.model,
            max_tokens: self.endpoint.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .endpoint
            .client
            .post(format!("{}/messages", self.endpoint.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let body = read_json(response).await?;
        extract_text(&body, TEXT_POINTER, self.endpoint.policy)
    }
}
