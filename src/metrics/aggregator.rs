//! @ai:module:intent Reduce provider outcomes and prompt results into statistics
//! @ai:module:layer application
//! @ai:module:public_api Comparator, ComparatorTrait, BATCH_RECOMMENDATION
//! @ai:module:stateless true

use crate::error::CompareError;
use crate::metrics::types::{AggregateStats, BatchAggregate, Outcome, PromptResult};
use std::collections::{BTreeMap, HashSet};

/// Constant advice attached to every batch summary.
pub const BATCH_RECOMMENDATION: &str =
    "Continue monitoring AI tool performance to optimize tool selection.";

/// @ai:intent Trait for outcome comparison
pub trait ComparatorTrait: Send + Sync {
    /// @ai:intent Reduce one fan-out's outcomes into aggregate statistics
    fn compare(&self, outcomes: &[Outcome]) -> Result<AggregateStats, CompareError>;
}

/// @ai:intent Computes aggregate statistics from outcomes
pub struct Comparator;

impl Comparator {
    /// @ai:intent Create a new comparator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Reduce per-prompt results into batch-level averages
    /// @ai:post Empty input yields prompt_count 0 and zeroed averages
    /// @ai:effects pure
    pub fn aggregate_batch(results: &[PromptResult]) -> BatchAggregate {
        BatchAggregate {
            prompt_count: results.len(),
            avg_latency_across_prompts: average(results.iter().map(|r| r.comparison.avg_latency)),
            avg_success_rate: average(results.iter().map(|r| r.comparison.success_rate())),
            recommendation: BATCH_RECOMMENDATION.to_string(),
        }
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl ComparatorTrait for Comparator {
    /// @ai:intent Reduce outcomes into aggregate statistics
    /// @ai:pre outcomes is non-empty and provider names are unique
    /// @ai:post fastest/slowest are the first outcome holding the min/max elapsed time
    /// @ai:effects pure
    fn compare(&self, outcomes: &[Outcome]) -> Result<AggregateStats, CompareError> {
        let first = outcomes.first().ok_or(CompareError::NoOutcomes)?;

        let mut seen = HashSet::new();
        if let Some(dup) = outcomes.iter().find(|o| !seen.insert(o.provider.as_str())) {
            return Err(CompareError::DuplicateProvider(dup.provider.clone()));
        }

        let mut fastest = first;
        let mut slowest = first;

        // Strict comparisons keep the earliest outcome on ties
        for outcome in &outcomes[1..] {
            if outcome.elapsed_seconds < fastest.elapsed_seconds {
                fastest = outcome;
            }
            if outcome.elapsed_seconds > slowest.elapsed_seconds {
                slowest = outcome;
            }
        }

        let response_lengths: BTreeMap<_, _> = outcomes
            .iter()
            .map(|o| (o.provider.clone(), o.payload.chars().count()))
            .collect();

        let responses: BTreeMap<_, _> = outcomes
            .iter()
            .map(|o| (o.provider.clone(), o.payload.clone()))
            .collect();

        Ok(AggregateStats {
            total_tools: outcomes.len(),
            successful_responses: outcomes.iter().filter(|o| o.is_success()).count(),
            avg_latency: average(outcomes.iter().map(|o| o.elapsed_seconds)),
            fastest_tool: fastest.clone(),
            slowest_tool: slowest.clone(),
            response_lengths,
            responses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::types::InsightSet;
    use pretty_assertions::assert_eq;

    fn sample_outcomes() -> Vec<Outcome> {
        vec![
            Outcome::success("provider1", "abc", 0.5),
            Outcome::error("provider2", "boom", 1.0),
            Outcome::success("provider3", "xyz", 1.5),
        ]
    }

    fn prompt_result(avg_latency: f64, successful: usize, total: usize) -> PromptResult {
        let outcome = Outcome::success("a", "x", avg_latency);
        PromptResult {
            prompt: "p".to_string(),
            timestamp: chrono::Utc::now(),
            comparison: AggregateStats {
                total_tools: total,
                successful_responses: successful,
                avg_latency,
                fastest_tool: outcome.clone(),
                slowest_tool: outcome,
                response_lengths: BTreeMap::new(),
                responses: BTreeMap::new(),
            },
            insights: InsightSet {
                performance: String::new(),
                reliability: String::new(),
                consistency: String::new(),
                recommendation: String::new(),
            },
        }
    }

    #[test]
    fn test_average() {
        let values = vec![10.0, 20.0, 30.0];
        assert!((average(values.into_iter()) - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_average_empty() {
        let values: Vec<f64> = vec![];
        assert!((average(values.into_iter()) - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_compare_mixed_outcomes() {
        let stats = Comparator::new().compare(&sample_outcomes()).unwrap();

        assert_eq!(stats.total_tools, 3);
        assert_eq!(stats.successful_responses, 2);
        assert!((stats.avg_latency - 1.0).abs() < 1e-9);
        assert_eq!(stats.fastest_tool.provider, "provider1");
        assert_eq!(stats.slowest_tool.provider, "provider3");

        let expected: BTreeMap<String, usize> = [
            ("provider1".to_string(), 3),
            ("provider2".to_string(), 4),
            ("provider3".to_string(), 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(stats.response_lengths, expected);
        assert_eq!(stats.responses["provider2"], "boom");
    }

    #[test]
    fn test_compare_equal_latency_prefers_first() {
        let outcomes = vec![
            Outcome::success("b", "one", 0.7),
            Outcome::success("a", "two", 0.7),
            Outcome::error("c", "three", 0.7),
        ];
        let stats = Comparator::new().compare(&outcomes).unwrap();

        assert!((stats.avg_latency - 0.7).abs() < 1e-9);
        assert_eq!(stats.fastest_tool.provider, "b");
        assert_eq!(stats.slowest_tool.provider, "b");
    }

    #[test]
    fn test_compare_all_failed() {
        let outcomes = vec![
            Outcome::error("a", "down", 0.2),
            Outcome::error("b", "down", 0.4),
        ];
        let stats = Comparator::new().compare(&outcomes).unwrap();

        assert_eq!(stats.successful_responses, 0);
        assert_eq!(stats.total_tools, 2);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_compare_counts_characters_not_bytes() {
        let outcomes = vec![Outcome::success("a", "héllo", 0.1)];
        let stats = Comparator::new().compare(&outcomes).unwrap();
        assert_eq!(stats.response_lengths["a"], 5);
    }

    #[test]
    fn test_compare_empty_is_rejected() {
        let result = Comparator::new().compare(&[]);
        assert_eq!(result.unwrap_err(), CompareError::NoOutcomes);
    }

    #[test]
    fn test_compare_rejects_duplicate_provider_names() {
        let outcomes = vec![
            Outcome::success("GPT", "a", 0.1),
            Outcome::success("GPT", "a".repeat(500), 0.1),
            Outcome::success("Claude", "a".repeat(500), 0.1),
        ];
        let result = Comparator::new().compare(&outcomes);
        assert_eq!(
            result.unwrap_err(),
            CompareError::DuplicateProvider("GPT".to_string())
        );
    }

    #[test]
    fn test_aggregate_batch() {
        let results = vec![prompt_result(1.0, 3, 3), prompt_result(3.0, 1, 2)];
        let batch = Comparator::aggregate_batch(&results);

        assert_eq!(batch.prompt_count, 2);
        assert!((batch.avg_latency_across_prompts - 2.0).abs() < 1e-9);
        assert!((batch.avg_success_rate - 0.75).abs() < 1e-9);
        assert_eq!(batch.recommendation, BATCH_RECOMMENDATION);
    }

    #[test]
    fn test_aggregate_batch_empty() {
        let batch = Comparator::aggregate_batch(&[]);

        assert_eq!(batch.prompt_count, 0);
        assert_eq!(batch.avg_latency_across_prompts, 0.0);
        assert_eq!(batch.avg_success_rate, 0.0);
    }
}
