//! # Data Loader Crate
//!
//! This crate loads the MovieLens CSV tables and joins them into the
//! Catalog Table used by the rest of the recommender.
//!
//! ## Main Components
//!
//! - **types**: Raw rows (Movie, Rating, Tag, Link) and the joined CatalogEntry
//! - **parser**: Parse CSV files into Rust structs, checking required columns
//! - **catalog**: The Catalog and its Popular Subset
//! - **index**: The one-time join that builds the Catalog
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data"))?;
//! let popular = catalog.popular_subset(100);
//!
//! let toy_story = catalog.get_movie(1).unwrap();
//! println!("{} has {} votes", toy_story.title, toy_story.vote_count);
//! ```

pub mod catalog;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use catalog::{Catalog, PopularSubset, PopularTitle};
pub use error::{DataLoadError, Result};
pub use types::{
    AverageRating,
    CatalogEntry,
    ExternalIds,
    Link,
    Movie,
    MovieId,
    MovieStats,
    Rating,
    Tag,
    UserId,
};
