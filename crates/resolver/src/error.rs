//! Error types for the resolver crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// No title scored at or above the threshold (or there were no titles)
    #[error("No title matches '{query}' (best score {best_score:.1}, threshold {threshold:.1})")]
    NoMatchFound {
        query: String,
        best_score: f64,
        threshold: f64,
    },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
