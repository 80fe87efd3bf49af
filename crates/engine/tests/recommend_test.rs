//! End-to-end queries against an engine loaded from CSV files, using the
//! default configuration (100-vote popularity, 60-point match threshold).

use engine::{EngineConfig, RecommendError, RecommendationEngine};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const MOVIES: &str = "movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,Heat (1995),Action|Crime|Thriller
4,Seven (a.k.a. Se7en) (1995),Mystery|Thriller
5,\"Usual Suspects, The (1995)\",Crime|Mystery|Thriller
6,Toy Story 2 (1999),Adventure|Animation|Children|Comedy|Fantasy
7,Monsters Inc. (2001),Adventure|Animation|Children|Comedy|Fantasy
8,Bug's Life A (1998),Adventure|Animation|Children|Comedy
9,Casino (1995),Crime|Drama
10,(no title) (2020),(no genres listed)
";

const TAGS: &str = "userId,movieId,tag,timestamp
1,1,pixar,1139045764
2,6,pixar,1139045765
3,7,pixar,1139045766
4,5,twist ending,1139045767
5,4,twist ending,1139045768
";

const LINKS: &str = "movieId,imdbId,tmdbId
1,0114709,862
6,0120363,863
";

/// Vote counts per movie; 1-5 and 6 are popular at the default threshold
const VOTES: &[(u32, usize, f32)] = &[
    (1, 150, 4.0),
    (2, 110, 3.0),
    (3, 120, 4.0),
    (4, 105, 4.5),
    (5, 130, 4.5),
    (6, 101, 3.5),
    (7, 40, 4.0),
    (8, 99, 3.0),
];

fn ratings_csv() -> String {
    let mut out = String::from("userId,movieId,rating,timestamp\n");
    for &(movie_id, count, value) in VOTES {
        for user in 0..count {
            writeln!(out, "{},{},{},{}", user + 1, movie_id, value, 1_000_000 + user).unwrap();
        }
    }
    out
}

fn write_dataset(dir: &Path) {
    fs::write(dir.join("movies.csv"), MOVIES).unwrap();
    fs::write(dir.join("ratings.csv"), ratings_csv()).unwrap();
    fs::write(dir.join("tags.csv"), TAGS).unwrap();
    fs::write(dir.join("links.csv"), LINKS).unwrap();
}

fn load_engine() -> (TempDir, RecommendationEngine) {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());
    let engine = RecommendationEngine::load(dir.path(), EngineConfig::default()).unwrap();
    (dir, engine)
}

#[test]
fn test_popular_titles_use_default_threshold() {
    let (_dir, engine) = load_engine();
    let titles = engine.popular_titles();

    assert_eq!(titles.len(), 6);
    assert!(titles.windows(2).all(|w| w[0] <= w[1]));
    assert!(!titles.iter().any(|t| t == "Bug's Life A (1998)"));
}

#[test]
fn test_toy_story_example() {
    let (_dir, engine) = load_engine();
    let rec = engine.recommend("Toy Story", 5).unwrap();

    assert_eq!(rec.closest_title, "Toy Story (1995)");
    assert_eq!(rec.neighbors.len(), 5);
    assert!(rec.neighbors.iter().all(|n| n.title != rec.closest_title));
    assert!(rec.neighbors.windows(2).all(|w| w[0].similarity >= w[1].similarity));

    // Unpopular entries still show up as neighbors.
    let top: Vec<&str> = rec.neighbors.iter().take(2).map(|n| n.title.as_str()).collect();
    assert_eq!(top, vec!["Toy Story 2 (1999)", "Monsters Inc. (2001)"]);
    assert_eq!(rec.neighbors[0].vote_count, 101);
    assert_eq!(rec.neighbors[1].vote_count, 40);
}

#[test]
fn test_fuzzy_query_with_typo() {
    let (_dir, engine) = load_engine();
    let rec = engine.recommend("usual suspects", 3).unwrap();
    assert_eq!(rec.closest_title, "Usual Suspects, The (1995)");
    assert_eq!(rec.neighbors[0].title, "Seven (a.k.a. Se7en) (1995)");
}

#[test]
fn test_not_found() {
    let (_dir, engine) = load_engine();
    let err = engine.recommend("asdfghjkl", 5).unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(err, RecommendError::NoMatchFound { .. }));
    assert_eq!(err.to_string(), "Movie 'asdfghjkl' not found. Try another.");
}

#[test]
fn test_load_from_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    let err = RecommendationEngine::load(&dir.path().join("nope"), EngineConfig::default())
        .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load catalog"));
}

#[test]
fn test_concurrent_queries_agree() {
    let (_dir, engine) = load_engine();
    let engine = Arc::new(engine);
    let expected = engine.recommend("Heat", 5).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.recommend("Heat", 5).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
