//! @ai:module:intent Result types for provider comparisons
//! @ai:module:layer domain
//! @ai:module:public_api Outcome, OutcomeStatus, AggregateStats, InsightSet, PromptResult, BatchAggregate, BatchReport
//! @ai:module:stateless true

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Whether a provider call produced text or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// @ai:intent Result of one provider call
/// @ai:invariant elapsed_seconds >= 0; payload holds the error description when status is Error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub provider: String,
    pub payload: String,
    pub elapsed_seconds: f64,
    pub status: OutcomeStatus,
}

impl Outcome {
    /// @ai:intent Build a successful outcome
    /// @ai:effects pure
    pub fn success(
        provider: impl Into<String>,
        payload: impl Into<String>,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            provider: provider.into(),
            payload: payload.into(),
            elapsed_seconds: elapsed_seconds.max(0.0),
            status: OutcomeStatus::Success,
        }
    }

    /// @ai:intent Build a failed outcome carrying the error description
    /// @ai:effects pure
    pub fn error(
        provider: impl Into<String>,
        message: impl Into<String>,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            provider: provider.into(),
            payload: message.into(),
            elapsed_seconds: elapsed_seconds.max(0.0),
            status: OutcomeStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// @ai:intent Aggregated statistics over the outcomes of one fan-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_tools: usize,
    pub successful_responses: usize,
    /// Mean elapsed seconds over all outcomes, failures included
    pub avg_latency: f64,
    pub fastest_tool: Outcome,
    pub slowest_tool: Outcome,
    /// Character count of each provider's payload (error text for failures)
    pub response_lengths: BTreeMap<String, usize>,
    pub responses: BTreeMap<String, String>,
}

impl AggregateStats {
    /// @ai:intent Fraction of provider calls that succeeded
    /// @ai:effects pure
    pub fn success_rate(&self) -> f64 {
        if self.total_tools == 0 {
            return 0.0;
        }

        self.successful_responses as f64 / self.total_tools as f64
    }

    /// @ai:intent Difference between the longest and shortest response
    /// @ai:effects pure
    pub fn length_spread(&self) -> usize {
        let max = self.response_lengths.values().max().copied().unwrap_or(0);
        let min = self.response_lengths.values().min().copied().unwrap_or(0);
        max - min
    }
}

/// @ai:intent Advisory strings for each insight category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSet {
    pub performance: String,
    pub reliability: String,
    pub consistency: String,
    pub recommendation: String,
}

impl InsightSet {
    /// @ai:intent Iterate categories in display order
    /// @ai:effects pure
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("performance", &self.performance),
            ("reliability", &self.reliability),
            ("consistency", &self.consistency),
            ("recommendation", &self.recommendation),
        ]
    }
}

/// @ai:intent Everything produced for a single prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResult {
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    pub comparison: AggregateStats,
    pub insights: InsightSet,
}

/// @ai:intent Averages across all prompts of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAggregate {
    pub prompt_count: usize,
    pub avg_latency_across_prompts: f64,
    pub avg_success_rate: f64,
    pub recommendation: String,
}

/// @ai:intent Complete batch output: per-prompt results in order plus the aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<PromptResult>,
    pub aggregate: BatchAggregate,
}
