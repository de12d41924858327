//! @ai:module:intent Configuration structs for the comparison tool
//! @ai:module:layer infrastructure
//! @ai:module:public_api CompareConfig, ProviderConfig, ProviderKind, RunConfig, InsightThresholds, ExtractionPolicy
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// @ai:intent Main configuration for the comparison tool
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub thresholds: InsightThresholds,
}

/// @ai:intent Supported vendor API shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    /// @ai:intent Get string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        }
    }
}

/// @ai:intent One registered provider
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name used in reports (e.g., "ChatGPT")
    pub name: String,
    pub kind: ProviderKind,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Overrides the vendor's default base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// @ai:intent What to do when a successful response lacks the text field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionPolicy {
    /// Treat the missing text as an empty response
    #[default]
    Degrade,
    /// Classify the call as an error
    Fail,
}

/// @ai:intent Run configuration for pipeline execution
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
    /// Per-request timeout; 0 disables it
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub on_missing_text: ExtractionPolicy,
}

/// @ai:intent Threshold values for insight rules
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightThresholds {
    #[serde(default = "default_max_avg_latency")]
    pub max_avg_latency_secs: f64,
    #[serde(default = "default_min_success_rate")]
    pub min_success_rate: f64,
    #[serde(default = "default_max_length_spread")]
    pub max_length_spread: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            run: RunConfig::default(),
            thresholds: InsightThresholds::default(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_delay_ms: default_batch_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            on_missing_text: ExtractionPolicy::default(),
        }
    }
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            max_avg_latency_secs: default_max_avg_latency(),
            min_success_rate: default_min_success_rate(),
            max_length_spread: default_max_length_spread(),
        }
    }
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: "ChatGPT".to_string(),
            kind: ProviderKind::OpenAi,
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_tokens: default_max_tokens(),
            base_url: None,
        },
        ProviderConfig {
            name: "Claude".to_string(),
            kind: ProviderKind::Anthropic,
            model: "claude-3-haiku-20240307".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            max_tokens: default_max_tokens(),
            base_url: None,
        },
        ProviderConfig {
            name: "Gemini".to_string(),
            kind: ProviderKind::Gemini,
            model: "gemini-pro".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            max_tokens: default_max_tokens(),
            base_url: None,
        },
    ]
}

fn default_max_tokens() -> u32 {
    150
}

fn default_batch_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_avg_latency() -> f64 {
    2.0
}

fn default_min_success_rate() -> f64 {
    0.8
}

fn default_max_length_spread() -> usize {
    200
}

impl CompareConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Reject provider lists the comparison cannot represent
    /// @ai:post At least one provider; provider names are unique (outcomes are keyed by name)
    /// @ai:effects pure
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.providers.is_empty() {
            anyhow::bail!("No providers configured");
        }

        let mut seen = HashSet::new();

        for provider in &self.providers {
            if !seen.insert(provider.name.as_str()) {
                anyhow::bail!("Duplicate provider name: {}", provider.name);
            }
        }

        Ok(())
    }
}

impl RunConfig {
    /// @ai:intent Delay between consecutive prompts of a batch
    /// @ai:effects pure
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// @ai:intent Per-request timeout, if enabled
    /// @ai:effects pure
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
