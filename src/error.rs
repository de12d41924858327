//! @ai:module:intent Error types for provider calls and comparisons
//! @ai:module:layer domain
//! @ai:module:public_api ProviderError, CompareError
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Failure of a single provider call
/// @ai:invariant Never escapes a provider client; always folded into an error Outcome
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key not set (expected environment variable {0})")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Response is missing expected field {0}")]
    MissingField(String),

    #[error("Provider task aborted: {0}")]
    Aborted(String),
}

/// @ai:intent Pipeline-level comparison failure
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompareError {
    #[error("No outcomes to compare (is at least one provider configured?)")]
    NoOutcomes,

    #[error("Duplicate provider name {0}: outcomes are keyed by provider")]
    DuplicateProvider(String),
}
