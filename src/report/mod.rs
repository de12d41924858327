//! @ai:module:intent Report generation for comparison results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, MarkdownReporter, excerpt

pub mod json_report;
pub mod markdown_report;

pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::metrics::BatchReport;
use anyhow::Result;
use std::path::Path;

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
        }
    }

    /// @ai:intent Generate all reports
    /// @ai:effects fs:write
    pub fn generate_all(&self, report: &BatchReport, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        self.json.generate(report, &output_dir.join("results.json"))?;
        self.markdown
            .generate(report, &output_dir.join("results.md"))?;

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Single-line excerpt of a prompt or response, cut after max_chars characters
/// @ai:effects pure
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if flat.chars().count() <= max_chars {
        flat
    } else {
        format!("{}...", flat.chars().take(max_chars).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Comparator;
    use tempfile::TempDir;

    #[test]
    fn test_generate_all_creates_both_files() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("nested").join("run");
        let report = BatchReport {
            results: vec![],
            aggregate: Comparator::aggregate_batch(&[]),
        };

        ReportGenerator::new()
            .generate_all(&report, &output_dir)
            .unwrap();

        assert!(output_dir.join("results.json").exists());
        assert!(output_dir.join("results.md").exists());
    }

    #[test]
    fn test_excerpt_truncates_long_text() {
        let long = "x".repeat(100);
        assert_eq!(excerpt(&long, 60).chars().count(), 63);
        assert_eq!(excerpt("short", 60), "short");
    }

    #[test]
    fn test_excerpt_flattens_whitespace() {
        assert_eq!(excerpt("first line\n  second\tline\n", 60), "first line second line");
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
    }
}
