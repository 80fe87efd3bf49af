//! TF-IDF Text Feature Index.
//!
//! One L2-normalized sparse vector per document, in document order.
//! Weights use raw term counts and smoothed inverse document frequency:
//!
//! ```text
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(d, t)   = count(t in d) * idf(t)
//! vector(d) = w(d, .) / ||w(d, .)||
//! ```
//!
//! A document with no vocabulary terms gets the zero vector.

use crate::stop_words::StopWords;
use crate::tokenizer::tokenize;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Index of a term in the vocabulary
pub type TermId = u32;

/// A sparse vector with strictly increasing term ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<TermId>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Build from (term, weight) pairs; pairs are sorted by term and zero
    /// weights are dropped.
    pub fn from_pairs(mut pairs: Vec<(TermId, f32)>) -> Self {
        pairs.sort_by_key(|(term, _)| *term);
        pairs.dedup_by_key(|(term, _)| *term);
        let (indices, values) = pairs.into_iter().filter(|(_, w)| *w != 0.0).unzip();
        Self { indices, values }
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, term: TermId) -> f32 {
        match self.indices.binary_search(&term) {
            Ok(i) => self.values[i],
            Err(_) => 0.0,
        }
    }

    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Dot product via a merge over both sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// The fitted index: vocabulary, idf weights and one vector per document
#[derive(Debug, Clone, Default)]
pub struct TfidfIndex {
    /// term -> id; ids follow alphabetical term order
    vocabulary: BTreeMap<String, TermId>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl TfidfIndex {
    /// Vector dimension: the number of retained terms
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, TermId> {
        &self.vocabulary
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.get(term).copied()
    }

    /// Vocabulary terms in id order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_id(term).map(|id| self.idf[id as usize])
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn vector(&self, doc: usize) -> Option<&SparseVector> {
        self.vectors.get(doc)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Fits a `TfidfIndex` over a document collection.
///
/// ## Example
/// ```
/// use features::TfidfVectorizer;
///
/// let docs = ["Comedy Romance", "Comedy Drama", "Horror"];
/// let index = TfidfVectorizer::new().fit_transform(&docs);
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.dimension(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: StopWords,
    min_df: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// English stop words, every term kept (min_df = 1)
    pub fn new() -> Self {
        Self {
            stop_words: StopWords::english(),
            min_df: 1,
        }
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Minimum number of documents a term must appear in; values below 1
    /// are treated as 1.
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Tokenize, build the vocabulary and weight every document
    pub fn fit_transform<S>(&self, documents: &[S]) -> TfidfIndex
    where
        S: AsRef<str> + Sync,
    {
        let n_docs = documents.len();

        // Per-document term counts
        let counts: Vec<HashMap<String, u32>> = documents
            .par_iter()
            .map(|doc| {
                let mut tf: HashMap<String, u32> = HashMap::new();
                for token in tokenize(doc.as_ref(), &self.stop_words) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // Document frequency
        let df: HashMap<&str, usize> = counts
            .par_iter()
            .fold(HashMap::new, |mut acc: HashMap<&str, usize>, tf| {
                for term in tf.keys() {
                    *acc.entry(term.as_str()).or_insert(0) += 1;
                }
                acc
            })
            .reduce(HashMap::new, |mut a, b| {
                for (term, n) in b {
                    *a.entry(term).or_insert(0) += n;
                }
                a
            });

        let kept: BTreeMap<&str, usize> = df
            .into_iter()
            .filter(|(_, n)| *n >= self.min_df)
            .collect();

        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (id, (term, doc_freq)) in kept.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), id as TermId);
            idf.push(((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)).ln() + 1.0);
        }
        debug!(terms = vocabulary.len(), "Vocabulary built");

        let vectors: Vec<SparseVector> = counts
            .par_iter()
            .map(|tf| {
                let mut weights: Vec<(TermId, f64)> = tf
                    .iter()
                    .filter_map(|(term, count)| {
                        vocabulary
                            .get(term)
                            .map(|&id| (id, *count as f64 * idf[id as usize]))
                    })
                    .collect();
                // Fixed summation order keeps the norm reproducible.
                weights.sort_by_key(|(id, _)| *id);
                let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm == 0.0 {
                    return SparseVector::default();
                }
                SparseVector::from_pairs(
                    weights
                        .into_iter()
                        .map(|(id, w)| (id, (w / norm) as f32))
                        .collect(),
                )
            })
            .collect();

        let empty = vectors.iter().filter(|v| v.is_zero()).count();
        info!(
            documents = n_docs,
            terms = vocabulary.len(),
            empty_documents = empty,
            "TF-IDF index fitted"
        );

        TfidfIndex {
            vocabulary,
            idf,
            vectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_alphabetical_without_stop_words() {
        let docs = ["Comedy Romance the", "Drama and Comedy"];
        let index = TfidfVectorizer::new().fit_transform(&docs);

        let terms: Vec<&str> = index.terms().collect();
        assert_eq!(terms, vec!["comedy", "drama", "romance"]);
        assert_eq!(index.term_id("the"), None);
    }

    #[test]
    fn test_smoothed_idf() {
        let docs = ["comedy romance", "comedy drama", "horror"];
        let index = TfidfVectorizer::new().fit_transform(&docs);

        let comedy = index.idf("comedy").unwrap();
        let horror = index.idf("horror").unwrap();
        assert!((comedy - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((horror - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_vectors_are_unit_length_or_zero() {
        let docs = ["comedy comedy romance", "", "the of and", "drama"];
        let index = TfidfVectorizer::new().fit_transform(&docs);

        assert_eq!(index.len(), 4);
        assert!((index.vector(0).unwrap().norm() - 1.0).abs() < 1e-6);
        assert!(index.vector(1).unwrap().is_zero());
        assert!(index.vector(2).unwrap().is_zero());
        assert!((index.vector(3).unwrap().norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_term_frequency_raises_weight() {
        let docs = ["comedy comedy romance", "romance comedy"];
        let index = TfidfVectorizer::new().fit_transform(&docs);
        let v = index.vector(0).unwrap();
        let comedy = index.term_id("comedy").unwrap();
        let romance = index.term_id("romance").unwrap();
        assert!(v.get(comedy) > v.get(romance));
    }

    #[test]
    fn test_min_df_prunes_rare_terms() {
        let docs = ["comedy pixar", "comedy drama"];
        let index = TfidfVectorizer::new().with_min_df(2).fit_transform(&docs);
        assert_eq!(index.dimension(), 1);
        assert!(index.term_id("pixar").is_none());
    }

    #[test]
    fn test_empty_collection() {
        let docs: [&str; 0] = [];
        let index = TfidfVectorizer::new().fit_transform(&docs);
        assert!(index.is_empty());
        assert_eq!(index.dimension(), 0);
    }

    #[test]
    fn test_sparse_dot() {
        let a = SparseVector::from_pairs(vec![(3, 0.5), (1, 2.0), (7, 0.0)]);
        let b = SparseVector::from_pairs(vec![(1, 1.0), (3, 2.0), (5, 4.0)]);
        assert_eq!(a.nnz(), 2);
        assert_eq!(a.dot(&b), 3.0);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }
}
