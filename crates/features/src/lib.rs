//! # Features Crate
//!
//! Text features and pairwise similarity for the movie catalog.
//!
//! ## Main Components
//!
//! - **tokenizer** / **stop_words**: lowercase word tokens minus English stop words
//! - **tfidf**: the TF-IDF Text Feature Index, one sparse unit vector per entry
//! - **similarity**: the dense cosine Similarity Matrix and neighbor ranking
//!
//! Both structures are built once over the full catalog and are read-only
//! afterwards, so they can be shared across threads behind an `Arc`.

pub mod similarity;
pub mod stop_words;
pub mod tfidf;
pub mod tokenizer;

pub use similarity::SimilarityMatrix;
pub use stop_words::StopWords;
pub use tfidf::{SparseVector, TermId, TfidfIndex, TfidfVectorizer};
pub use tokenizer::tokenize;
