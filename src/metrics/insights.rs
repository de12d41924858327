//! @ai:module:intent Threshold rules turning aggregate statistics into advice
//! @ai:module:layer application
//! @ai:module:public_api InsightGenerator
//! @ai:module:stateless true

use crate::config::InsightThresholds;
use crate::metrics::types::{AggregateStats, InsightSet};

const HIGH_LATENCY: &str = "High latency detected. Consider optimization or caching.";
const GOOD_PERFORMANCE: &str = "Good performance across all tools.";
const LOW_RELIABILITY: &str = "Low success rate. Check API keys and network connectivity.";
const HIGH_RELIABILITY: &str = "High reliability across AI tools.";
const INCONSISTENT_LENGTHS: &str = "Significant variation in response lengths. Review prompts.";
const CONSISTENT_LENGTHS: &str = "Consistent response lengths across tools.";

/// @ai:intent Maps statistics to insight strings using fixed thresholds
pub struct InsightGenerator {
    thresholds: InsightThresholds,
}

impl InsightGenerator {
    /// @ai:intent Create a generator with the given thresholds
    /// @ai:effects pure
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// @ai:intent Evaluate every category independently
    /// @ai:post Each threshold comparison is strict; boundary values map to the positive advice
    /// @ai:effects pure
    pub fn generate(&self, stats: &AggregateStats) -> InsightSet {
        let performance = if stats.avg_latency > self.thresholds.max_avg_latency_secs {
            HIGH_LATENCY
        } else {
            GOOD_PERFORMANCE
        };

        let reliability = if stats.success_rate() < self.thresholds.min_success_rate {
            LOW_RELIABILITY
        } else {
            HIGH_RELIABILITY
        };

        let consistency = if stats.length_spread() > self.thresholds.max_length_spread {
            INCONSISTENT_LENGTHS
        } else {
            CONSISTENT_LENGTHS
        };

        InsightSet {
            performance: performance.to_string(),
            reliability: reliability.to_string(),
            consistency: consistency.to_string(),
            recommendation: format!(
                "Use {} for time-sensitive tasks (fastest response).",
                stats.fastest_tool.provider
            ),
        }
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new(InsightThresholds::default())
    }
}
