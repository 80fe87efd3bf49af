mod links;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{EngineConfig, Neighbor, Recommendation, RecommendError, RecommendationEngine};
use links::{or_na, MovieLinks};
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// movie-recs - Content-based movie recommendations
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Find movies similar to a title using genres and tags", long_about = None)]
struct Cli {
    /// Directory holding movies.csv, ratings.csv, tags.csv and links.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Minimum number of ratings for a title to be matchable
    #[arg(long, default_value = "100")]
    min_votes: u32,

    /// Minimum fuzzy match score (0-100)
    #[arg(long, default_value = "60")]
    match_threshold: f64,

    /// OMDb API key used for poster links
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    omdb_api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Movie title; typos and missing years are fine
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        top_n: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the titles that can be matched
    Titles {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        contains: Option<String>,
    },

    /// Show how a query scores against the matchable titles
    Search {
        /// Text to match
        title: String,

        /// Number of candidates to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Run benchmark to test query latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = EngineConfig::default()
        .with_popularity_threshold(cli.min_votes)
        .with_match_threshold(cli.match_threshold);

    // Build the engine (this may take a moment)
    info!(data_dir = %cli.data_dir.display(), "Loading dataset");
    let start = Instant::now();
    let engine = Arc::new(RecommendationEngine::load(&cli.data_dir, config)?);
    info!(elapsed = ?start.elapsed(), "Engine built");

    let omdb_api_key = cli.omdb_api_key.as_deref();

    match cli.command {
        Commands::Recommend { title, top_n, json } => {
            handle_recommend(&engine, &title, top_n, json, omdb_api_key)?
        }
        Commands::Titles { contains } => handle_titles(&engine, contains.as_deref()),
        Commands::Search { title, limit } => handle_search(&engine, &title, limit),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(engine, requests, concurrent).await?,
    }

    Ok(())
}

/// A neighbor with its links, for JSON output
#[derive(Serialize)]
struct NeighborView<'a> {
    #[serde(flatten)]
    neighbor: &'a Neighbor,
    links: MovieLinks,
}

#[derive(Serialize)]
struct RecommendationView<'a> {
    query: &'a str,
    closest_title: &'a str,
    match_score: f64,
    recommendations: Vec<NeighborView<'a>>,
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    title: &str,
    top_n: usize,
    json: bool,
    omdb_api_key: Option<&str>,
) -> Result<()> {
    let rec = match engine.recommend(title, top_n) {
        Ok(rec) => rec,
        Err(err) if err.is_recoverable() => {
            println!("{}", err.to_string().yellow());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        let view = RecommendationView {
            query: &rec.query,
            closest_title: &rec.closest_title,
            match_score: rec.match_score,
            recommendations: rec
                .neighbors
                .iter()
                .map(|n| NeighborView {
                    neighbor: n,
                    links: MovieLinks::new(&n.title, n.imdb_id, n.tmdb_id, omdb_api_key),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_recommendation(&rec, omdb_api_key);
    }
    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(engine: &RecommendationEngine, contains: Option<&str>) {
    let needle = contains.map(str::to_lowercase);
    let titles: Vec<&String> = engine
        .popular_titles()
        .iter()
        .filter(|t| needle.as_ref().is_none_or(|n| t.to_lowercase().contains(n)))
        .collect();

    println!(
        "{}",
        format!(
            "{} matchable titles (at least {} ratings):",
            titles.len(),
            engine.config().popularity_threshold
        )
        .bold()
        .blue()
    );
    for title in titles {
        println!("  {}", title);
    }
}

/// Handle the 'search' command
fn handle_search(engine: &RecommendationEngine, query: &str, limit: usize) {
    let threshold = engine.config().match_threshold;
    println!("{}", format!("Match scores for '{}':", query).bold().blue());

    for (rank, m) in engine.search(query, limit).iter().enumerate() {
        let score = format!("{:5.1}", m.score);
        let score = if m.score >= threshold {
            score.green()
        } else {
            score.red()
        };
        println!("{:>3}. {}  {}", rank + 1, score, m.title);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: Arc<RecommendationEngine>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Lowercased popular titles, so every query takes the fuzzy path
    let queries: Vec<String> = {
        let titles = engine.popular_titles();
        if titles.is_empty() {
            bail!("No matchable titles; try a lower --min-votes");
        }
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|_| titles.choose(&mut rng).map(|t| t.to_lowercase()))
            .collect()
    };

    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let start = Instant::now();

    let mut handles = vec![];
    for query in queries {
        let engine = engine.clone();
        let permit = semaphore.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let started = Instant::now();
            let result = engine.recommend(&query, engine.config().default_top_n);
            if let Err(RecommendError::NoMatchFound { query }) = &result {
                debug!(%query, "Benchmark query did not resolve");
            }
            (started.elapsed(), result.is_ok())
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    let mut resolved = 0usize;
    for handle in handles {
        let (elapsed, ok) = handle.await?;
        timings.push(elapsed);
        resolved += ok as usize;
    }
    let wall = start.elapsed();

    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / wall.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} resolved), concurrency {}", requests, resolved, concurrent.max(1));
    println!("Total time: {:?}", wall);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Format and print a recommendation for the terminal
fn print_recommendation(rec: &Recommendation, omdb_api_key: Option<&str>) {
    println!(
        "{} {} {}",
        "Recommendations for".bold().blue(),
        rec.closest_title.bold(),
        format!("(match {:.0})", rec.match_score).dimmed()
    );

    if rec.neighbors.is_empty() {
        println!("  No similar movies found.");
        return;
    }

    for (rank, n) in rec.neighbors.iter().enumerate() {
        let links = MovieLinks::new(&n.title, n.imdb_id, n.tmdb_id, omdb_api_key);
        println!(
            "{}. {} - similarity {:.3}",
            (rank + 1).to_string().green(),
            n.title.bold(),
            n.similarity
        );
        println!("   Rating: {} ({} votes)", n.average_rating, n.vote_count);
        println!("   IMDb: {}", or_na(&links.imdb));
        println!("   TMDb: {}", or_na(&links.tmdb));
        println!("   Search: {}", links.search);
        if let Some(poster) = &links.poster {
            println!("   Poster: {}", poster);
        }
    }
}
