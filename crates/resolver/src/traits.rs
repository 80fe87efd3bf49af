//! Core trait for fuzzy title scoring.

/// Scores how well a free-text query matches one candidate title.
///
/// Scores are on a 0-100 scale, higher is better. `Send + Sync` so one
/// scorer can serve concurrent queries against a shared resolver.
pub trait Scorer: Send + Sync {
    /// Returns the name of this scorer (for logging/debugging)
    fn name(&self) -> &str;

    /// Similarity of `query` to `choice`, in `[0, 100]`
    fn score(&self, query: &str, choice: &str) -> f64;
}
