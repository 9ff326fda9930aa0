//! Jaccard similarity ranking against the encoded corpus.

use std::cmp::Ordering;

use crate::encoder::{EncodedMatrix, EncodedVector};
use crate::error::{SearchError, SearchResult};

/// Results returned per filter unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// Jaccard similarity of two vectors' set bits.
///
/// Two vectors with no set bits at all have an empty union; that case is
/// defined as `0.0`.
pub fn jaccard(a: &EncodedVector, b: &EncodedVector) -> f64 {
    let (intersection, union) = a.overlap(b);
    if union == 0 {
        0.0
    } else {
        f64::from(intersection) / f64::from(union)
    }
}

/// Similarity of `query` to every corpus row, in corpus order.
///
/// # Errors
///
/// Returns [`SearchError::DimensionMismatch`] if the query was not encoded
/// over the matrix's vocabulary.
pub fn score(query: &EncodedVector, matrix: &EncodedMatrix) -> SearchResult<Vec<f64>> {
    if query.dims() != matrix.dims() {
        return Err(SearchError::DimensionMismatch {
            expected: matrix.dims(),
            found: query.dims(),
        });
    }
    Ok(matrix.rows().iter().map(|row| jaccard(query, row)).collect())
}

/// Indices of the `k` highest scores, best first.
///
/// The sort is stable: equal scores keep corpus order.
pub fn top_k(scores: &[f64], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });
    indices.truncate(k);
    indices
}

/// A corpus row selected by the ranker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub score: f64,
}

/// Ranks the encoded corpus and keeps the best `k` rows.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    k: usize,
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl SimilarityRanker {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn rank(&self, query: &EncodedVector, matrix: &EncodedMatrix) -> SearchResult<Vec<Ranked>> {
        let scores = score(query, matrix)?;
        Ok(top_k(&scores, self.k)
            .into_iter()
            .map(|index| Ranked {
                index,
                score: scores[index],
            })
            .collect())
    }
}
