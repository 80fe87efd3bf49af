//! The Catalog Table and its Popular Subset.
//!
//! `Catalog` owns every joined entry plus the raw per-movie rating lists,
//! and hands out references. It is built once (see `index.rs`) and never
//! mutated afterwards, so an `Arc<Catalog>` can be read from any thread.

use crate::types::*;
use std::collections::{HashMap, HashSet};

/// Joined, deduplicated catalog of movies, in order of first appearance in
/// the movies table.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) entries: Vec<CatalogEntry>,

    /// movie id -> position in `entries`
    pub(crate) id_index: HashMap<MovieId, usize>,
    /// title -> position of its first occurrence in `entries`
    pub(crate) title_index: HashMap<String, usize>,

    /// All raw ratings received by each movie, in file order
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,
    pub(crate) total_ratings: usize,
}

impl Catalog {
    /// All entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entry at a catalog position
    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog position of a movie id
    pub fn position_of(&self, movie_id: MovieId) -> Option<usize> {
        self.id_index.get(&movie_id).copied()
    }

    /// Catalog position of the first entry carrying exactly this title
    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    /// Get a movie by id
    pub fn get_movie(&self, movie_id: MovieId) -> Option<&CatalogEntry> {
        self.position_of(movie_id).map(|pos| &self.entries[pos])
    }

    /// Raw ratings for a movie; empty slice when it has none
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Mean and count recomputed from the movie's raw rating values
    pub fn movie_stats(&self, movie_id: MovieId) -> MovieStats {
        MovieStats::from_ratings(self.get_movie_ratings(movie_id))
    }

    /// (movies, ratings, tagged movies) for logging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let tagged = self.entries.iter().filter(|e| !e.tags.is_empty()).count();
        (self.entries.len(), self.total_ratings, tagged)
    }

    /// Entries with at least `min_votes` ratings, one per title, sorted by title.
    ///
    /// When several popular entries share a title, the first one in catalog
    /// order is kept. Each title is mapped to the position the catalog's own
    /// title lookup returns, so a popular title always resolves in the full
    /// catalog.
    pub fn popular_subset(&self, min_votes: u32) -> PopularSubset {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut titles: Vec<PopularTitle> = Vec::new();

        for entry in self.entries.iter().filter(|e| e.vote_count >= min_votes) {
            if !seen.insert(entry.title.as_str()) {
                continue;
            }
            // Present by construction: every entry's title is in title_index.
            if let Some(position) = self.position_of_title(&entry.title) {
                titles.push(PopularTitle {
                    title: entry.title.clone(),
                    position,
                });
            }
        }

        // Stable, so equal titles can't reorder (they're already unique).
        titles.sort_by(|a, b| a.title.cmp(&b.title));

        PopularSubset { min_votes, titles }
    }
}

/// A popular title and its position in the full catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularTitle {
    pub title: String,
    pub position: usize,
}

/// The fuzzy-match vocabulary: popular titles sorted by title
#[derive(Debug, Clone, Default)]
pub struct PopularSubset {
    min_votes: u32,
    titles: Vec<PopularTitle>,
}

impl PopularSubset {
    pub fn min_votes(&self) -> u32 {
        self.min_votes
    }

    pub fn entries(&self) -> &[PopularTitle] {
        &self.titles
    }

    /// Titles in sorted order
    pub fn titles(&self) -> Vec<String> {
        self.titles.iter().map(|t| t.title.clone()).collect()
    }

    /// Catalog position for a popular title
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.titles
            .binary_search_by(|t| t.title.as_str().cmp(title))
            .ok()
            .map(|i| self.titles[i].position)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
