//! # Engine Crate
//!
//! Content-based Recommendation Engine. Ties together the catalog
//! (`data-loader`), the TF-IDF index and similarity matrix (`features`) and
//! the fuzzy title resolver (`resolver`) behind a single query:
//!
//! ```ignore
//! use engine::{EngineConfig, RecommendationEngine};
//! use std::path::Path;
//!
//! let engine = RecommendationEngine::load(Path::new("data"), EngineConfig::default())?;
//! let rec = engine.recommend("Toy Story", 5)?;
//! for neighbor in &rec.neighbors {
//!     println!("{} ({})", neighbor.title, neighbor.average_rating);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use engine::{Neighbor, Recommendation, RecommendationEngine};
pub use error::RecommendError;
