//! @ai:module:intent CLI for the AI tool comparison system
//! @ai:module:layer presentation

use ai_compare::{
    config::CompareConfig,
    metrics::{AggregateStats, BatchAggregate, BatchReport, InsightSet, PromptResult},
    report::{excerpt, ReportGenerator},
    runner::{build_mock_providers, build_providers, create_runner, ComparisonRunner},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const DEMO_PROMPT: &str = "Explain the benefits of using AI in software development";

const DEMO_BATCH: [&str; 3] = [
    "What is machine learning?",
    "How does natural language processing work?",
    "Explain the concept of neural networks",
];

#[derive(Parser)]
#[command(name = "ai-compare")]
#[command(about = "Compare latency, reliability and output of multiple AI text-generation APIs")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use canned responses instead of calling the providers
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one prompt to every provider and compare the answers
    Compare {
        prompt: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run several prompts sequentially and aggregate the comparisons
    Batch {
        prompts: Vec<String>,

        /// Read additional prompts from a file (one per line)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write results.json and results.md under this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the batch report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the example: one prompt, then a three-prompt batch
    Demo,

    /// List configured providers
    Providers,

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "ai-compare.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ai_compare=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare { prompt, json } => {
            let runner = build_runner(cli.config, cli.dry_run)?;
            run_single(&runner, &prompt, json).await
        }
        Commands::Batch {
            prompts,
            file,
            output,
            json,
        } => {
            let runner = build_runner(cli.config, cli.dry_run)?;
            let prompts = collect_prompts(prompts, file.as_deref())?;
            run_batch(&runner, &prompts, output.as_deref(), json).await
        }
        Commands::Demo => {
            let runner = build_runner(cli.config, cli.dry_run)?;
            run_demo(&runner).await
        }
        Commands::Providers => list_providers(cli.config),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Build the comparison runner from configuration
/// @ai:effects fs:read, env
fn build_runner(config_path: Option<PathBuf>, dry_run: bool) -> Result<ComparisonRunner> {
    let config = load_or_default_config(config_path)?;
    config.validate()?;

    let providers = if dry_run {
        tracing::info!("Running in dry-run mode");
        build_mock_providers(&config)
    } else {
        build_providers(&config)?
    };

    Ok(create_runner(providers, &config))
}

/// @ai:intent Run the single-prompt pipeline and print it
/// @ai:effects network, io
async fn run_single(runner: &ComparisonRunner, prompt: &str, json: bool) -> Result<()> {
    let result = runner.run_prompt(prompt).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_prompt_result(&result);
    }

    Ok(())
}

/// @ai:intent Run the batch pipeline, print it and optionally write reports
/// @ai:effects network, io, fs:write
async fn run_batch(
    runner: &ComparisonRunner,
    prompts: &[String],
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    if prompts.is_empty() {
        tracing::warn!("No prompts given; the batch summary will be empty");
    }

    let report = runner.run_batch(prompts).await?;

    if let Some(dir) = output {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let output_dir = dir.join(timestamp.to_string());
        ReportGenerator::new()
            .generate_all(&report, &output_dir)
            .context("Failed to write reports")?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_batch_report(&report);
    }

    Ok(())
}

/// @ai:intent Run one prompt and the three-prompt example batch
/// @ai:effects network, io
async fn run_demo(runner: &ComparisonRunner) -> Result<()> {
    println!("Single prompt comparison");
    println!("========================");
    run_single(runner, DEMO_PROMPT, false).await?;

    println!();
    println!("Batch comparison");
    println!("================");
    let prompts: Vec<String> = DEMO_BATCH.iter().map(|p| p.to_string()).collect();
    run_batch(runner, &prompts, None, false).await
}

/// @ai:intent Merge prompts from arguments and an optional file
/// @ai:effects fs:read
fn collect_prompts(mut prompts: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompts from {}", path.display()))?;

        prompts.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    Ok(prompts)
}

/// @ai:intent List configured providers and key availability
/// @ai:effects fs:read, env, io
fn list_providers(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config_path)?;

    println!("Configured providers ({}):", config.providers.len());
    println!();
    println!(
        "{:<12} {:<10} {:<28} {:<20} {:<8}",
        "Name", "Kind", "Model", "Key variable", "Key set"
    );
    println!("{}", "-".repeat(82));

    for provider in &config.providers {
        let key_set = std::env::var(&provider.api_key_env)
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        println!(
            "{:<12} {:<10} {:<28} {:<20} {:<8}",
            provider.name,
            provider.kind.as_str(),
            provider.model,
            provider.api_key_env,
            if key_set { "yes" } else { "no" }
        );
    }

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = CompareConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<CompareConfig> {
    match path {
        Some(p) => CompareConfig::load(&p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => {
            let default_path = PathBuf::from("ai-compare.toml");

            if default_path.exists() {
                CompareConfig::load(&default_path).context("Failed to load ai-compare.toml")
            } else {
                Ok(CompareConfig::default())
            }
        }
    }
}

/// @ai:intent Print comparison and insights for one prompt
/// @ai:effects io
fn print_prompt_result(result: &PromptResult) {
    println!();
    println!("Prompt: {}", result.prompt);
    println!("Time:   {}", result.timestamp.to_rfc3339());
    println!();
    print_comparison(&result.comparison);
    print_insights(&result.insights);
}

/// @ai:intent Print per-provider statistics
/// @ai:effects io
fn print_comparison(stats: &AggregateStats) {
    println!("{:<15} {:>8}  {}", "Provider", "Length", "Response");
    println!("{}", "-".repeat(70));

    for (provider, length) in &stats.response_lengths {
        let response = stats.responses.get(provider).map(String::as_str).unwrap_or("");
        println!("{:<15} {:>8}  {}", provider, length, excerpt(response, 45));
    }

    println!();
    println!(
        "Successful responses: {}/{}",
        stats.successful_responses, stats.total_tools
    );
    println!("Average latency:      {:.2}s", stats.avg_latency);
    println!(
        "Fastest:              {} ({:.2}s)",
        stats.fastest_tool.provider, stats.fastest_tool.elapsed_seconds
    );
    println!(
        "Slowest:              {} ({:.2}s)",
        stats.slowest_tool.provider, stats.slowest_tool.elapsed_seconds
    );
    println!();
}

/// @ai:intent Print insight strings by category
/// @ai:effects io
fn print_insights(insights: &InsightSet) {
    println!("Insights:");

    for (category, advice) in insights.entries() {
        println!("  {:<15} {}", format!("{}:", category), advice);
    }

    println!();
}

/// @ai:intent Print every prompt of a batch followed by the summary
/// @ai:effects io
fn print_batch_report(report: &BatchReport) {
    for result in &report.results {
        print_prompt_result(result);
    }

    print_batch_summary(&report.aggregate);
}

/// @ai:intent Print batch-level averages
/// @ai:effects io
fn print_batch_summary(aggregate: &BatchAggregate) {
    println!("Batch Summary");
    println!("=============");
    println!("Prompts:                  {}", aggregate.prompt_count);
    println!(
        "Avg latency (per prompt): {:.2}s",
        aggregate.avg_latency_across_prompts
    );
    println!(
        "Avg success rate:         {:.1}%",
        aggregate.avg_success_rate * 100.0
    );
    println!("Recommendation:           {}", aggregate.recommendation);
    println!();
}
