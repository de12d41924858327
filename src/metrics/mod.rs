//! @ai:module:intent Outcome types, comparison statistics and insights
//! @ai:module:layer application
//! @ai:module:public_api Outcome, AggregateStats, InsightSet, PromptResult, BatchAggregate, BatchReport, Comparator, InsightGenerator

pub mod aggregator;
pub mod insights;
pub mod types;

pub use aggregator::{Comparator, ComparatorTrait, BATCH_RECOMMENDATION};
pub use insights::InsightGenerator;
pub use types::{
    AggregateStats, BatchAggregate, BatchReport, InsightSet, Outcome, OutcomeStatus, PromptResult,
};
