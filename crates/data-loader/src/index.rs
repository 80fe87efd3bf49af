//! Catalog building: the one-time join of the four raw tables.
//!
//! Steps:
//! 1. Aggregate tags per movie (space-joined, order of occurrence)
//! 2. Left-join tags and genres onto movies, missing -> ""
//! 3. combined = genres + " " + tags
//! 4. Left-join external ids from links
//! 5. Left-join vote counts (number of rating rows), missing -> 0

use crate::catalog::Catalog;
use crate::error::Result;
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

impl Catalog {
    /// Load the catalog from a directory containing movies.csv, ratings.csv,
    /// tags.csv and links.csv.
    ///
    /// The four files are parsed in parallel. Any missing file, missing
    /// column or malformed row aborts the load.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading MovieLens tables from {}", data_dir.display());
        let start = Instant::now();

        let movies_path = data_dir.join(parser::MOVIES_FILE);
        let ratings_path = data_dir.join(parser::RATINGS_FILE);
        let tags_path = data_dir.join(parser::TAGS_FILE);
        let links_path = data_dir.join(parser::LINKS_FILE);

        // Nested joins give four-way parallelism; ratings is by far the largest
        let ((movies, ratings), (tags, links)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_movies(&movies_path),
                    || parser::parse_ratings(&ratings_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_tags(&tags_path),
                    || parser::parse_links(&links_path),
                )
            },
        );

        let movies = movies?;
        let ratings = ratings?;
        let tags = tags?;
        let links = links?;

        info!(
            "Parsed {} movies, {} ratings, {} tags, {} links in {:.2?}",
            movies.len(),
            ratings.len(),
            tags.len(),
            links.len(),
            start.elapsed()
        );

        Ok(Self::from_tables(movies, ratings, tags, links))
    }

    /// Build the catalog from already parsed tables
    pub fn from_tables(
        movies: Vec<Movie>,
        ratings: Vec<Rating>,
        tags: Vec<Tag>,
        links: Vec<Link>,
    ) -> Self {
        let tags_by_movie = aggregate_tags(&tags);

        // First link row per movie wins
        let mut links_by_movie: HashMap<MovieId, ExternalIds> = HashMap::new();
        for link in &links {
            links_by_movie.entry(link.movie_id).or_insert(ExternalIds {
                imdb_id: link.imdb_id,
                tmdb_id: link.tmdb_id,
            });
        }

        let total_ratings = ratings.len();
        let mut movie_ratings: HashMap<MovieId, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            movie_ratings.entry(rating.movie_id).or_default().push(rating);
        }

        let mut catalog = Catalog {
            total_ratings,
            ..Catalog::default()
        };

        for movie in movies {
            if catalog.id_index.contains_key(&movie.id) {
                warn!(movie_id = movie.id, "Duplicate movieId in movies table, keeping first row");
                continue;
            }

            let genres = join_genres(&movie.genres);
            let tags = tags_by_movie.get(&movie.id).cloned().unwrap_or_default();
            let combined = format!("{} {}", genres, tags);
            let vote_count = movie_ratings.get(&movie.id).map_or(0, |r| r.len() as u32);

            let position = catalog.entries.len();
            catalog.id_index.insert(movie.id, position);
            catalog.title_index.entry(movie.title.clone()).or_insert(position);
            catalog.entries.push(CatalogEntry {
                movie_id: movie.id,
                title: movie.title,
                genres,
                tags,
                combined,
                external_ids: links_by_movie.get(&movie.id).copied().unwrap_or_default(),
                vote_count,
            });
        }

        let orphaned = movie_ratings
            .keys()
            .filter(|id| !catalog.id_index.contains_key(*id))
            .count();
        if orphaned > 0 {
            warn!("{} rated movie ids have no row in the movies table", orphaned);
        }

        catalog.movie_ratings = movie_ratings;

        let (movies, ratings, tagged) = catalog.counts();
        info!(
            "Catalog built: {} movies ({} tagged), {} ratings",
            movies, tagged, ratings
        );
        catalog
    }
}

/// Join each movie's tags with single spaces, keeping order of occurrence.
///
/// Blank tags carry no text and are skipped.
fn aggregate_tags(tags: &[Tag]) -> HashMap<MovieId, String> {
    tags.par_iter()
        .fold(HashMap::new, |mut acc: HashMap<MovieId, Vec<&str>>, tag| {
            let text = tag.tag.trim();
            if !text.is_empty() {
                acc.entry(tag.movie_id).or_default().push(text);
            }
            acc
        })
        // Reduction keeps left-to-right order, so per-movie order survives
        .reduce(HashMap::new, |mut acc, local| {
            for (movie_id, texts) in local {
                acc.entry(movie_id).or_default().extend(texts);
            }
            acc
        })
        .into_iter()
        .map(|(movie_id, texts)| (movie_id, texts.join(" ")))
        .collect()
}

/// `Adventure|Animation` -> `Adventure Animation`
fn join_genres(raw: &str) -> String {
    raw.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str, genres: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genres: genres.to_string(),
        }
    }

    fn tag(movie_id: MovieId, text: &str) -> Tag {
        Tag {
            user_id: Some(1),
            movie_id,
            tag: text.to_string(),
            timestamp: None,
        }
    }

    fn rating(movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id: Some(1),
            movie_id,
            rating: value,
            timestamp: None,
        }
    }

    #[test]
    fn test_aggregate_tags_preserves_order() {
        let tags = vec![
            tag(1, "pixar"),
            tag(2, "mafia"),
            tag(1, "fun"),
            tag(1, "  "),
            tag(1, "toys"),
        ];
        let aggregated = aggregate_tags(&tags);

        assert_eq!(aggregated[&1], "pixar fun toys");
        assert_eq!(aggregated[&2], "mafia");
    }

    #[test]
    fn test_join_genres() {
        assert_eq!(join_genres("Adventure|Animation|Children"), "Adventure Animation Children");
        assert_eq!(join_genres(""), "");
        assert_eq!(join_genres("(no genres listed)"), "(no genres listed)");
    }

    #[test]
    fn test_combined_text_keeps_separator() {
        let catalog = Catalog::from_tables(
            vec![
                movie(1, "Tagged (1995)", "Comedy"),
                movie(2, "Untagged (1996)", "Drama|War"),
                movie(3, "Nothing (1997)", ""),
            ],
            vec![],
            vec![tag(1, "funny")],
            vec![],
        );

        assert_eq!(catalog.entries()[0].combined, "Comedy funny");
        assert_eq!(catalog.entries()[1].combined, "Drama War ");
        assert_eq!(catalog.entries()[2].combined, " ");
    }

    #[test]
    fn test_left_joins_and_vote_counts() {
        let catalog = Catalog::from_tables(
            vec![movie(1, "A (2000)", "Action"), movie(2, "B (2001)", "Comedy")],
            vec![rating(1, 4.0), rating(1, 2.0), rating(99, 5.0)],
            vec![],
            vec![Link {
                movie_id: 1,
                imdb_id: Some(114709),
                tmdb_id: Some(862),
            }],
        );

        let a = catalog.get_movie(1).unwrap();
        assert_eq!(a.vote_count, 2);
        assert_eq!(a.external_ids.imdb_id, Some(114709));

        let b = catalog.get_movie(2).unwrap();
        assert_eq!(b.vote_count, 0);
        assert_eq!(b.external_ids, ExternalIds::default());

        assert_eq!(catalog.counts(), (2, 3, 0));
    }

    #[test]
    fn test_duplicate_movie_ids_keep_first() {
        let catalog = Catalog::from_tables(
            vec![movie(1, "First (2000)", "Action"), movie(1, "Second (2000)", "Drama")],
            vec![],
            vec![],
            vec![],
        );

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().title, "First (2000)");
    }

    #[test]
    fn test_duplicate_titles_map_to_first_position() {
        let catalog = Catalog::from_tables(
            vec![
                movie(1, "Emma (1996)", "Comedy"),
                movie(2, "Other (1996)", "Drama"),
                movie(3, "Emma (1996)", "Romance"),
            ],
            vec![],
            vec![],
            vec![],
        );

        assert_eq!(catalog.position_of_title("Emma (1996)"), Some(0));
        assert_eq!(catalog.position_of(3), Some(2));
    }
}
