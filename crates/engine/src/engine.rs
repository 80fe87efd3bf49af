//! # Recommendation Engine
//!
//! Owns the immutable query context and answers title queries:
//! 1. Resolve the free-text query to the closest popular title
//! 2. Look up that title's position in the full catalog
//! 3. Rank the other entries by similarity, best first
//! 4. Attach rating stats recomputed from each neighbor's raw ratings
//!
//! Everything is built once by `RecommendationEngine::build` and never
//! mutated, so one engine behind an `Arc` serves any number of threads.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use data_loader::{AverageRating, Catalog, MovieId, PopularSubset};
use features::{SimilarityMatrix, TfidfIndex, TfidfVectorizer};
use resolver::{TitleMatch, TitleResolver};

use crate::config::EngineConfig;
use crate::error::RecommendError;

/// One recommended movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    /// Cosine similarity to the resolved title, in [0, 1]
    pub similarity: f32,
    pub average_rating: AverageRating,
    pub vote_count: u32,
    pub imdb_id: Option<u32>,
    pub tmdb_id: Option<u32>,
}

/// Result of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub query: String,
    pub closest_title: String,
    /// Fuzzy score of `closest_title` against the query, 0-100
    pub match_score: f64,
    /// Most similar entries, best first; never contains the resolved entry
    pub neighbors: Vec<Neighbor>,
}

/// The shared, read-only recommendation context
#[derive(Debug)]
pub struct RecommendationEngine {
    config: EngineConfig,
    catalog: Catalog,
    popular: PopularSubset,
    index: TfidfIndex,
    similarity: SimilarityMatrix,
    resolver: TitleResolver,
}

impl RecommendationEngine {
    /// Load the tables from `data_dir` and build the engine
    pub fn load(data_dir: &Path, config: EngineConfig) -> Result<Self> {
        let catalog = Catalog::load_from_dir(data_dir)
            .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;
        Ok(Self::build(catalog, config))
    }

    /// Build the feature index, similarity matrix and resolver over `catalog`
    pub fn build(catalog: Catalog, config: EngineConfig) -> Self {
        let start = Instant::now();

        let popular = catalog.popular_subset(config.popularity_threshold);
        info!(
            popular = popular.len(),
            min_votes = config.popularity_threshold,
            "Popular subset selected"
        );

        let documents: Vec<&str> = catalog.entries().iter().map(|e| e.combined.as_str()).collect();
        let index = TfidfVectorizer::new()
            .with_min_df(config.min_df)
            .fit_transform(&documents);
        let similarity = SimilarityMatrix::from_index(&index);

        let resolver = TitleResolver::new(popular.titles()).with_threshold(config.match_threshold);

        info!(
            entries = catalog.len(),
            terms = index.dimension(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendation engine ready"
        );

        Self {
            config,
            catalog,
            popular,
            index,
            similarity,
            resolver,
        }
    }

    /// Recommend `top_n` movies similar to the title closest to `query`
    #[instrument(skip(self))]
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<Recommendation, RecommendError> {
        let matched = self
            .resolver
            .resolve(query)
            .map_err(|_| RecommendError::NoMatchFound {
                query: query.to_string(),
            })?;

        let Some(position) = self.catalog.position_of_title(&matched.title) else {
            error!(title = %matched.title, "Resolved title missing from catalog");
            return Err(RecommendError::LookupInconsistency {
                title: matched.title,
            });
        };
        debug!(title = %matched.title, score = matched.score, position, "Query resolved");

        let neighbors: Vec<Neighbor> = self
            .similarity
            .ranked_neighbors(position, top_n)
            .into_iter()
            .filter_map(|(pos, similarity)| self.neighbor(pos, similarity))
            .collect();

        Ok(Recommendation {
            query: query.to_string(),
            closest_title: matched.title,
            match_score: matched.score,
            neighbors,
        })
    }

    /// `recommend` with the configured default neighbor count
    pub fn recommend_default(&self, query: &str) -> Result<Recommendation, RecommendError> {
        self.recommend(query, self.config.default_top_n)
    }

    fn neighbor(&self, position: usize, similarity: f32) -> Option<Neighbor> {
        let entry = self.catalog.get(position)?;
        let stats = self.catalog.movie_stats(entry.movie_id);

        Some(Neighbor {
            movie_id: entry.movie_id,
            title: entry.title.clone(),
            genres: entry.genres.clone(),
            similarity,
            average_rating: stats.average_rating,
            vote_count: stats.rating_count,
            imdb_id: entry.external_ids.imdb_id,
            tmdb_id: entry.external_ids.tmdb_id,
        })
    }

    /// Resolver scores of the best `limit` popular titles for `query`
    pub fn search(&self, query: &str, limit: usize) -> Vec<TitleMatch> {
        self.resolver.rank(query, limit)
    }

    /// The matchable titles, sorted
    pub fn popular_titles(&self) -> &[String] {
        self.resolver.titles()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn popular(&self) -> &PopularSubset {
        &self.popular
    }

    pub fn feature_index(&self) -> &TfidfIndex {
        &self.index
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}
