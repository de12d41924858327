//! @ai:module:intent Concurrent fan-out of one prompt to every provider
//! @ai:module:layer application
//! @ai:module:public_api FanOutDispatcher
//! @ai:module:stateless true

use crate::error::ProviderError;
use crate::metrics::Outcome;
use crate::runner::client::ProviderClient;
use std::sync::Arc;
use std::time::Instant;

/// @ai:intent Dispatches a prompt to all registered providers and joins the results
pub struct FanOutDispatcher {
    providers: Vec<Arc<dyn ProviderClient>>,
}

impl FanOutDispatcher {
    /// @ai:intent Create a dispatcher over a fixed provider list
    /// @ai:effects pure
    pub fn new(providers: Vec<Arc<dyn ProviderClient>>) -> Self {
        Self { providers }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// @ai:intent Send the prompt to every provider concurrently
    /// @ai:post One outcome per provider, in registration order
    /// @ai:effects network
    pub async fn dispatch(&self, prompt: &str) -> Vec<Outcome> {
        let start = Instant::now();

        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let prompt = prompt.to_string();
                let name = provider.name().to_string();
                let handle = tokio::spawn(async move { provider.send(&prompt).await });
                (name, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());

        for (name, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("Provider task for {} did not complete: {}", name, e);
                    let error = ProviderError::Aborted(e.to_string());
                    outcomes.push(Outcome::error(
                        name,
                        error.to_string(),
                        start.elapsed().as_secs_f64(),
                    ));
                }
            }
        }

        tracing::info!(
            "Fan-out to {} providers finished in {:.2}s",
            outcomes.len(),
            start.elapsed().as_secs_f64()
        );

        outcomes
    }
}
