//! Dense pairwise cosine Similarity Matrix.
//!
//! Rows are computed in parallel through an inverted index (term -> postings),
//! so each row only touches documents that share at least one term. For a
//! pair (i, j) the products are always summed in ascending term order, which
//! makes `M[i][j]` and `M[j][i]` bit-identical.

use crate::tfidf::{SparseVector, TfidfIndex};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Square matrix of cosine similarities between catalog positions.
///
/// Values lie in `[0, 1]`. The diagonal is 1 for every non-zero vector and 0
/// for zero vectors, whose whole row and column are 0.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    n: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute the matrix for every vector in the index
    pub fn from_index(index: &TfidfIndex) -> Self {
        Self::from_vectors(index.vectors(), index.dimension())
    }

    /// Compute the matrix for L2-normalized vectors over `dimension` terms
    pub fn from_vectors(vectors: &[SparseVector], dimension: usize) -> Self {
        let start = Instant::now();
        let n = vectors.len();

        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); dimension];
        for (doc, vector) in vectors.iter().enumerate() {
            for (term, weight) in vector.iter() {
                if let Some(list) = postings.get_mut(term as usize) {
                    list.push((doc as u32, weight));
                }
            }
        }

        let mut scores = vec![0.0f32; n * n];
        scores
            .par_chunks_mut(n.max(1))
            .enumerate()
            .for_each(|(i, row)| {
                let vector = &vectors[i];
                if vector.is_zero() {
                    return;
                }
                for (term, weight) in vector.iter() {
                    if let Some(list) = postings.get(term as usize) {
                        for &(doc, other) in list {
                            row[doc as usize] += weight * other;
                        }
                    }
                }
                for value in row.iter_mut() {
                    *value = value.clamp(0.0, 1.0);
                }
                row[i] = 1.0;
            });

        info!(
            entries = n,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Similarity matrix built"
        );

        Self { n, scores }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.scores[i * self.n + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.n {
            Some(&self.scores[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    /// The `top_n` most similar other positions to `i`, best first.
    ///
    /// The sort is stable, so equal scores keep catalog order. Position `i`
    /// itself is never returned. Out-of-range `i` yields an empty list.
    pub fn ranked_neighbors(&self, i: usize, top_n: usize) -> Vec<(usize, f32)> {
        let Some(row) = self.row(i) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_n);
        ranked
    }
}
