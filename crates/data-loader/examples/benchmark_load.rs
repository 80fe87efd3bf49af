use anyhow::Result;
use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let data_dir = Path::new("data");

    println!("Loading MovieLens tables...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_dir(data_dir)?;
    let elapsed = start.elapsed();

    let (movies, ratings, tagged) = catalog.counts();
    let popular = catalog.popular_subset(100);

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Tagged movies: {}", tagged);
    println!("Ratings: {}", ratings);
    println!("Popular titles (>= 100 votes): {}", popular.len());
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
    Ok(())
}
