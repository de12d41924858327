//! @ai:module:intent Provider clients, fan-out dispatch and pipeline execution
//! @ai:module:layer infrastructure
//! @ai:module:public_api ProviderClient, OpenAiClient, AnthropicClient, GeminiClient, FanOutDispatcher, ComparisonRunner, build_providers

pub mod anthropic;
pub mod client;
pub mod dispatcher;
pub mod executor;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use client::{HttpEndpoint, MockProviderClient, ProviderClient};
pub use dispatcher::FanOutDispatcher;
pub use executor::{create_runner, ComparisonRunner};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use crate::config::{CompareConfig, ProviderKind};
use anyhow::{Context, Result};
use std::sync::Arc;

/// @ai:intent Instantiate one client per configured provider, in configuration order
/// @ai:effects env
pub fn build_providers(config: &CompareConfig) -> Result<Vec<Arc<dyn ProviderClient>>> {
    config
        .providers
        .iter()
        .map(|provider| -> reqwest::Result<Arc<dyn ProviderClient>> {
            let client: Arc<dyn ProviderClient> = match provider.kind {
                ProviderKind::OpenAi => Arc::new(OpenAiClient::new(provider, &config.run)?),
                ProviderKind::Anthropic => Arc::new(AnthropicClient::new(provider, &config.run)?),
                ProviderKind::Gemini => Arc::new(GeminiClient::new(provider, &config.run)?),
            };
            Ok(client)
        })
        .collect::<reqwest::Result<Vec<_>>>()
        .context("Failed to create HTTP client")
}

/// @ai:intent Canned clients standing in for every configured provider
/// @ai:effects pure
pub fn build_mock_providers(config: &CompareConfig) -> Vec<Arc<dyn ProviderClient>> {
    config
        .providers
        .iter()
        .map(|provider| {
            let response = format!(
                "[DRY RUN] {} ({}) would answer here",
                provider.name, provider.model
            );
            Arc::new(MockProviderClient::new(provider.name.clone(), response)) as Arc<dyn ProviderClient>
        })
        .collect()
}
