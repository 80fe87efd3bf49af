//! Error types for recommendation queries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// The query didn't match any popular title closely enough
    #[error("Movie '{query}' not found. Try another.")]
    NoMatchFound { query: String },

    /// A resolved title has no entry in the catalog. Indicates the popular
    /// subset and the catalog disagree; never expected on a consistent build.
    #[error("Resolved title '{title}' is missing from the catalog")]
    LookupInconsistency { title: String },
}

impl RecommendError {
    /// Whether the caller can simply try another query
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RecommendError::NoMatchFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
