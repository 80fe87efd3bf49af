//! Core domain types for the MovieLens "latest" CSV dataset.
//!
//! Raw rows (`Movie`, `Rating`, `Tag`, `Link`) mirror the four input tables
//! one-to-one and are deserialized straight from CSV. `CatalogEntry` is the
//! joined, deduplicated row the rest of the system works with.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Raw table rows
// =============================================================================

/// One row of `movies.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub id: MovieId,
    pub title: String,
    /// Pipe-separated genre labels, e.g. `Adventure|Animation|Children`
    #[serde(default)]
    pub genres: String,
}

/// One row of `ratings.csv`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Rating value, 0.5 to 5.0 in half-star steps for MovieLens
    pub rating: f32,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// One tagging event from `tags.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub tag: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Cross references from `links.csv`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    #[serde(rename = "imdbId")]
    pub imdb_id: Option<u32>,
    #[serde(rename = "tmdbId")]
    pub tmdb_id: Option<u32>,
}

// =============================================================================
// Catalog types
// =============================================================================

/// External database identifiers for a movie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIds {
    pub imdb_id: Option<u32>,
    pub tmdb_id: Option<u32>,
}

/// One distinct movie with its derived text features and vote count.
///
/// `combined` is always `genres + " " + tags`, even when either side is
/// empty, and is the only text the feature index sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub movie_id: MovieId,
    pub title: String,
    /// Genre labels joined by single spaces
    pub genres: String,
    /// Free-text tags joined by single spaces, in order of occurrence
    pub tags: String,
    pub combined: String,
    pub external_ids: ExternalIds,
    /// Number of rating events for this movie
    pub vote_count: u32,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Mean rating of a movie, or an explicit marker when it has no ratings
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageRating {
    Available(f64),
    Unavailable,
}

impl AverageRating {
    pub fn value(&self) -> Option<f64> {
        match self {
            AverageRating::Available(v) => Some(*v),
            AverageRating::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, AverageRating::Available(_))
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageRating::Available(v) => write!(f, "{:.2}", v),
            AverageRating::Unavailable => write!(f, "N/A"),
        }
    }
}

// A number when available, the string "unavailable" otherwise.
impl Serialize for AverageRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AverageRating::Available(v) => serializer.serialize_f64(*v),
            AverageRating::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

/// Rating statistics for a movie, computed from its raw rating values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovieStats {
    pub average_rating: AverageRating,
    pub rating_count: u32,
}

impl MovieStats {
    /// Compute stats from a slice of raw ratings.
    ///
    /// The mean is accumulated in f64 so that large rating lists do not
    /// drift from the exact mean of the stored values.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let rating_count = ratings.len() as u32;
        let average_rating = if ratings.is_empty() {
            AverageRating::Unavailable
        } else {
            let total: f64 = ratings.iter().map(|r| r.rating as f64).sum();
            AverageRating::Available(total / ratings.len() as f64)
        };

        Self {
            average_rating,
            rating_count,
        }
    }
}
