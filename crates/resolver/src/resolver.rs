//! Fuzzy Title Resolver: free text -> closest known title.

use crate::error::{ResolveError, Result};
use crate::scorer::WeightedRatio;
use crate::traits::Scorer;
use tracing::debug;

/// Minimum score (0-100) a title needs to be accepted
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// A resolved title with its score and position in the resolver's title list
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    pub title: String,
    pub score: f64,
    pub index: usize,
}

/// Matches queries against a fixed title vocabulary.
///
/// Matching has two passes:
/// 1. Exact match on the raw string, which wins with score 100
/// 2. Best fuzzy score; ties go to the earliest title in the list
///
/// Titles are kept in the order given, so a sorted vocabulary makes the
/// tie-break alphabetical.
pub struct TitleResolver {
    titles: Vec<String>,
    threshold: f64,
    scorer: Box<dyn Scorer>,
}

impl std::fmt::Debug for TitleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleResolver")
            .field("titles", &self.titles.len())
            .field("threshold", &self.threshold)
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl TitleResolver {
    /// Resolver over `titles` with the default threshold and `WeightedRatio`
    pub fn new(titles: Vec<String>) -> Self {
        Self {
            titles,
            threshold: DEFAULT_THRESHOLD,
            scorer: Box::new(WeightedRatio),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 100.0);
        self
    }

    pub fn with_scorer(mut self, scorer: Box<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Closest title scoring at least the threshold
    pub fn resolve(&self, query: &str) -> Result<TitleMatch> {
        // Pass 1: Exact match
        if let Some(index) = self.titles.iter().position(|t| t == query) {
            debug!(query, index, "Exact title match");
            return Ok(TitleMatch {
                title: self.titles[index].clone(),
                score: 100.0,
                index,
            });
        }

        // Pass 2: Fuzzy match
        let mut best: Option<(usize, f64)> = None;
        for (index, title) in self.titles.iter().enumerate() {
            let score = self.scorer.score(query, title);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score >= self.threshold => {
                debug!(query, title = %self.titles[index], score, "Fuzzy title match");
                Ok(TitleMatch {
                    title: self.titles[index].clone(),
                    score,
                    index,
                })
            }
            other => {
                let best_score = other.map(|(_, s)| s).unwrap_or(0.0);
                debug!(query, best_score, threshold = self.threshold, "No title match");
                Err(ResolveError::NoMatchFound {
                    query: query.to_string(),
                    best_score,
                    threshold: self.threshold,
                })
            }
        }
    }

    /// Top `limit` titles by score regardless of threshold, best first.
    /// Equal scores keep title-list order.
    pub fn rank(&self, query: &str, limit: usize) -> Vec<TitleMatch> {
        let mut scored: Vec<TitleMatch> = self
            .titles
            .iter()
            .enumerate()
            .map(|(index, title)| TitleMatch {
                title: title.clone(),
                score: if title == query {
                    100.0
                } else {
                    self.scorer.score(query, title)
                },
                index,
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::SimpleRatio;

    fn titles() -> Vec<String> {
        let mut titles: Vec<String> = [
            "Toy Story 2 (1999)",
            "Toy Story (1995)",
            "Matrix, The (1999)",
            "Pulp Fiction (1994)",
            "Forrest Gump (1994)",
            "Heat (1995)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        titles.sort();
        titles
    }

    #[test]
    fn test_exact_match_wins() {
        let resolver = TitleResolver::new(titles());
        let m = resolver.resolve("Heat (1995)").unwrap();
        assert_eq!(m.title, "Heat (1995)");
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn test_tie_goes_to_first_sorted_title() {
        let resolver = TitleResolver::new(titles());
        let m = resolver.resolve("Toy Story").unwrap();
        assert_eq!(m.title, "Toy Story (1995)");
        assert!(m.score >= DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_typo_resolves() {
        let resolver = TitleResolver::new(titles());
        assert_eq!(resolver.resolve("forest gump").unwrap().title, "Forrest Gump (1994)");
    }

    #[test]
    fn test_noise_is_not_found() {
        let resolver = TitleResolver::new(titles());
        match resolver.resolve("asdfghjkl") {
            Err(ResolveError::NoMatchFound { query, threshold, best_score }) => {
                assert_eq!(query, "asdfghjkl");
                assert_eq!(threshold, DEFAULT_THRESHOLD);
                assert!(best_score < threshold);
            }
            other => panic!("Expected NoMatchFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_vocabulary() {
        let resolver = TitleResolver::new(vec![]);
        assert!(resolver.resolve("Toy Story (1995)").is_err());
        assert!(resolver.rank("Toy Story", 3).is_empty());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let strict = TitleResolver::new(titles()).with_threshold(95.0);
        assert!(strict.resolve("Toy Story").is_err());

        let lax = TitleResolver::new(titles()).with_threshold(0.0);
        assert!(lax.resolve("asdfghjkl").is_ok());
    }

    #[test]
    fn test_custom_scorer() {
        let resolver = TitleResolver::new(titles()).with_scorer(Box::new(SimpleRatio));
        assert_eq!(resolver.scorer_name(), "SimpleRatio");
        // Whole-string ratio penalizes the missing year.
        let m = resolver.resolve("Toy Story").unwrap();
        assert_eq!(m.title, "Toy Story (1995)");
        assert!(m.score < 90.0);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let resolver = TitleResolver::new(titles());
        let ranked = resolver.rank("Toy Story", 3);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].title, "Toy Story (1995)");
        assert_eq!(ranked[1].title, "Toy Story 2 (1999)");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let resolver = TitleResolver::new(titles());
        assert_eq!(resolver.resolve("matrix"), resolver.resolve("matrix"));
    }
}
