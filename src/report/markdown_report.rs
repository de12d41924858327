//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::metrics::{BatchAggregate, BatchReport, PromptResult};
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from a batch
    fn generate(&self, report: &BatchReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from batch results
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render the whole report as a string
    /// @ai:effects pure
    pub fn render(report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "# AI Tool Comparison Results")?;
        writeln!(output)?;
        if let Some(first) = report.results.first() {
            writeln!(output, "**Date:** {}", first.timestamp.to_rfc3339())?;
        }
        writeln!(output, "**Prompts:** {}", report.aggregate.prompt_count)?;
        writeln!(output)?;

        output.push_str(&Self::generate_prompt_table(&report.results)?);

        for (i, result) in report.results.iter().enumerate() {
            output.push_str(&Self::generate_prompt_section(i + 1, result)?);
        }

        output.push_str(&Self::generate_batch_summary(&report.aggregate)?);

        Ok(output)
    }

    /// @ai:intent Generate one row per prompt
    /// @ai:effects pure
    fn generate_prompt_table(results: &[PromptResult]) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "## Overview")?;
        writeln!(output)?;
        writeln!(output, "| # | Prompt | Avg Latency | Success | Fastest | Slowest |")?;
        writeln!(output, "|---|--------|-------------|---------|---------|---------|")?;

        for (i, result) in results.iter().enumerate() {
            let stats = &result.comparison;
            writeln!(
                output,
                "| {} | {} | {:.2}s | {}/{} | {} | {} |",
                i + 1,
                escape_cell(&result.prompt),
                stats.avg_latency,
                stats.successful_responses,
                stats.total_tools,
                stats.fastest_tool.provider,
                stats.slowest_tool.provider
            )?;
        }

        writeln!(output)?;
        Ok(output)
    }

    /// @ai:intent Generate per-prompt provider details and insights
    /// @ai:effects pure
    fn generate_prompt_section(index: usize, result: &PromptResult) -> Result<String> {
        let mut output = String::new();
        let stats = &result.comparison;

        writeln!(output, "## Prompt {}", index)?;
        writeln!(output)?;
        // Every line is quoted so multi-line prompts stay inside the blockquote
        for line in result.prompt.split('\n') {
            writeln!(output, "> {}", line.trim_end_matches('\r'))?;
        }
        writeln!(output)?;
        writeln!(output, "| Provider | Response Length |")?;
        writeln!(output, "|----------|-----------------|")?;

        for (provider, length) in &stats.response_lengths {
            writeln!(output, "| {} | {} |", provider, length)?;
        }

        writeln!(output)?;
        writeln!(output, "**Insights**")?;
        writeln!(output)?;

        for (category, advice) in result.insights.entries() {
            writeln!(output, "- **{}:** {}", category, advice)?;
        }

        writeln!(output)?;
        Ok(output)
    }

    /// @ai:intent Generate batch-level averages
    /// @ai:effects pure
    fn generate_batch_summary(aggregate: &BatchAggregate) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "## Batch Summary")?;
        writeln!(output)?;
        writeln!(
            output,
            "- Average latency across prompts: {:.2}s",
            aggregate.avg_latency_across_prompts
        )?;
        writeln!(
            output,
            "- Average success rate: {:.1}%",
            aggregate.avg_success_rate * 100.0
        )?;
        writeln!(output, "- Recommendation: {}", aggregate.recommendation)?;

        Ok(output)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Keep prompt text from breaking the table layout
/// @ai:effects pure
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &BatchReport, output_path: &Path) -> Result<()> {
        let content = Self::render(report)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }
}
