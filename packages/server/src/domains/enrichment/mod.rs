// Enrichment domain - batch scoring of posts against hosted inference models
//
// Responsibilities:
// - Sentiment analysis (text classification, top-label selection)
// - Zero-shot topic classification against the category taxonomy
// - Idempotent persistence: upserts keyed on post (and category), so
//   concurrent or repeated runs converge to the same rows

pub mod classifier;
pub mod models;
pub mod sentiment;

pub use classifier::*;
pub use models::*;
pub use sentiment::*;

/// Counts reported by a batch enrichment run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOutcome {
    /// Posts whose results were written
    pub processed: usize,
    /// Posts that errored (logged, not fatal)
    pub failed: usize,
    /// Posts considered by the run
    pub total: usize,
}
