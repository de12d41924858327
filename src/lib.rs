//! @ai:module:intent AI tool comparison library
//! @ai:module:layer application
//! @ai:module:public_api config, error, metrics, report, runner

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::CompareConfig;
pub use error::{CompareError, ProviderError};
pub use metrics::{AggregateStats, BatchReport, InsightSet, Outcome, PromptResult};
pub use report::ReportGenerator;
pub use runner::{build_providers, ComparisonRunner, FanOutDispatcher, ProviderClient};
