//! # Resolver Crate
//!
//! Fuzzy Title Resolver: maps free-text input to the closest title in a
//! fixed vocabulary (the catalog's popular titles), or reports that nothing
//! is close enough.
//!
//! ## Example Usage
//!
//! ```
//! use resolver::TitleResolver;
//!
//! let resolver = TitleResolver::new(vec![
//!     "Heat (1995)".to_string(),
//!     "Toy Story (1995)".to_string(),
//! ]);
//! let m = resolver.resolve("toy story").unwrap();
//! assert_eq!(m.title, "Toy Story (1995)");
//! assert!(resolver.resolve("asdfghjkl").is_err());
//! ```

pub mod error;
pub mod resolver;
pub mod scorer;
pub mod traits;

pub use error::{ResolveError, Result};
pub use resolver::{TitleMatch, TitleResolver, DEFAULT_THRESHOLD};
pub use scorer::{SimpleRatio, WeightedRatio};
pub use traits::Scorer;
