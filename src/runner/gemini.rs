//! @ai:module:intent Google Gemini generateContent client
//! @ai:module:layer infrastructure
//! @ai:module:public_api GeminiClient
//! @ai:module:stateless true

use crate::config::{ProviderConfig, RunConfig};
use crate::error::ProviderError;
use crate::runner::client::{extract_text, read_json, HttpEndpoint, ProviderClient};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// @ai:intent generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

/// @ai:intent Client for the Gemini generateContent endpoint
pub struct GeminiClient {
    endpoint: HttpEndpoint,
}

impl GeminiClient {
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
impl ProviderClient for GeminiClient {
    fn name(&self) -> &str {
        &self.endpoint.name
    }

    /// @ai:intent Send the prompt as a single content part and return the first candidate
    /// @ai:effects network
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.endpoint.api_key()?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.endpoint.max_tokens,
            },
        };

        // Key goes in a header so it never shows up in transport error URLs
        let response = self
            .endpoint
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.endpoint.base_url, self.endpoint.model
            ))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let body = read_json(response).await?;
        extract_text(&body, TEXT_POINTER, self.endpoint.policy)
    }
}
