//! Engine configuration.

/// Tunables for building and querying the engine.
///
/// ## Example
/// ```
/// use engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_popularity_threshold(50)
///     .with_default_top_n(10);
/// assert_eq!(config.match_threshold, 60.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Minimum vote count for a title to be matchable
    pub popularity_threshold: u32,
    /// Minimum fuzzy score (0-100) to accept a title
    pub match_threshold: f64,
    /// Neighbors returned by `recommend_default`
    pub default_top_n: usize,
    /// Minimum document frequency for a term to enter the vocabulary
    pub min_df: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            popularity_threshold: 100,
            match_threshold: 60.0,
            default_top_n: 5,
            min_df: 1,
        }
    }
}

impl EngineConfig {
    pub fn with_popularity_threshold(mut self, min_votes: u32) -> Self {
        self.popularity_threshold = min_votes;
        self
    }

    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }
}
