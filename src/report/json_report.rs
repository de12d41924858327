//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::metrics::BatchReport;
use anyhow::Result;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from a batch
    fn generate(&self, report: &BatchReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates JSON reports from batch results
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &BatchReport, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Comparator, ComparatorTrait, InsightGenerator, Outcome, PromptResult};
    use tempfile::TempDir;

    #[test]
    fn test_generate_json_report() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.json");

        let comparison = Comparator::new()
            .compare(&[
                Outcome::success("ChatGPT", "hello", 0.4),
                Outcome::error("Gemini", "API error (403): forbidden", 0.2),
            ])
            .unwrap();
        let insights = InsightGenerator::default().generate(&comparison);
        let results = vec![PromptResult {
            prompt: "Say hello".to_string(),
            timestamp: chrono::Utc::now(),
            comparison,
            insights,
        }];
        let report = BatchReport {
            aggregate: Comparator::aggregate_batch(&results),
            results,
        };

        reporter.generate(&report, &output).unwrap();
        assert!(output.exists());

        let content = std::fs::read_to_string(&output).unwrap();
        let parsed: BatchReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.aggregate.prompt_count, 1);
        assert_eq!(parsed.results[0].comparison.fastest_tool.provider, "Gemini");
        assert!(content.contains("\"status\": \"error\""));
    }
}
