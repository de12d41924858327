//! @ai:module:intent Single-prompt and batch comparison pipelines
//! @ai:module:layer application
//! @ai:module:public_api ComparisonRunner, create_runner
//! @ai:module:stateless true

use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::metrics::{BatchReport, Comparator, ComparatorTrait, InsightGenerator, PromptResult};
use crate::report::excerpt;
use crate::runner::client::ProviderClient;
use crate::runner::dispatcher::FanOutDispatcher;
use std::sync::Arc;
use std::time::Duration;

/// @ai:intent Runs prompts through fan-out, comparison and insight generation
pub struct ComparisonRunner {
    dispatcher: FanOutDispatcher,
    comparator: Comparator,
    insights: InsightGenerator,
    batch_delay: Duration,
}

impl ComparisonRunner {
    /// @ai:intent Create a new comparison runner
    /// @ai:effects pure
    pub fn new(
        dispatcher: FanOutDispatcher,
        insights: InsightGenerator,
        batch_delay: Duration,
    ) -> Self {
        Self {
            dispatcher,
            comparator: Comparator::new(),
            insights,
            batch_delay,
        }
    }

    /// @ai:intent Run the full pipeline for one prompt
    /// @ai:post Provider failures appear as error outcomes; only an empty or ambiguous provider list errors
    /// @ai:effects network
    pub async fn run_prompt(&self, prompt: &str) -> Result<PromptResult, CompareError> {
        tracing::info!("Comparing providers for prompt: {}", excerpt(prompt, 60));

        let timestamp = chrono::Utc::now();
        let outcomes = self.dispatcher.dispatch(prompt).await;
        let comparison = self.comparator.compare(&outcomes)?;
        let insights = self.insights.generate(&comparison);

        Ok(PromptResult {
            prompt: prompt.to_string(),
            timestamp,
            comparison,
            insights,
        })
    }

    /// @ai:intent Run prompts sequentially with a fixed pause between them
    /// @ai:post results preserve input order; an empty list yields a vacuous aggregate
    /// @ai:effects network, time
    pub async fn run_batch<S: AsRef<str>>(
        &self,
        prompts: &[S],
    ) -> Result<BatchReport, CompareError> {
        let mut results = Vec::with_capacity(prompts.len());
        let total = prompts.len();

        for (i, prompt) in prompts.iter().enumerate() {
            tracing::info!("[{}/{}] Running batch prompt", i + 1, total);

            results.push(self.run_prompt(prompt.as_ref()).await?);

            if i + 1 < total && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        let aggregate = Comparator::aggregate_batch(&results);

        Ok(BatchReport { results, aggregate })
    }
}

/// @ai:intent Create runner from config and an already-built provider list
/// @ai:effects pure
pub fn create_runner(
    providers: Vec<Arc<dyn ProviderClient>>,
    config: &CompareConfig,
) -> ComparisonRunner {
    ComparisonRunner::new(
        FanOutDispatcher::new(providers),
        InsightGenerator::new(config.thresholds.clone()),
        config.run.batch_delay(),
    )
}
