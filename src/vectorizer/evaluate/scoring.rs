use std::fmt::{self, Debug};

use num::Num;

use crate::error::{Error, Result};
use crate::utils::math::vector::ZeroSpVec;

/// Best row found by [`best_match`]
#[derive(Clone, Copy, PartialEq)]
pub struct HitEntry {
    /// row of the corpus matrix
    pub row: usize,
    /// cosine similarity in [0, 1]
    pub score: f64,
}

impl Debug for HitEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "row {}: {:.6}", self.row, self.score)
        } else {
            f.debug_struct("HitEntry")
                .field("row", &self.row)
                .field("score", &self.score)
                .finish()
        }
    }
}

/// Cosine similarity of two unit-length (or all-zero) term vectors.
///
/// Both vectors are normalized, so this is their dot product. Weights are
/// never negative; the result is clamped to [0, 1] to absorb rounding.
#[inline]
pub fn similarity<N>(query: &ZeroSpVec<N>, row: &ZeroSpVec<N>) -> f64
where
    N: Num + Copy + Into<f64>,
{
    query.dot::<f64>(row).clamp(0.0, 1.0)
}

/// 最も類似度の高い行を返す
/// Exhaustive scan for the row most similar to `query`.
///
/// Ties keep the earliest row, so an all-zero query (every score 0.0)
/// lands on row 0.
///
/// # Errors
/// * `EmptyCorpus` if `corpus` has no rows
pub fn best_match<N>(query: &ZeroSpVec<N>, corpus: &[ZeroSpVec<N>]) -> Result<HitEntry>
where
    N: Num + Copy + Into<f64>,
{
    let mut rows = corpus.iter().enumerate();
    let (_, first) = rows.next().ok_or(Error::EmptyCorpus)?;
    let mut best = HitEntry {
        row: 0,
        score: similarity(query, first),
    };
    for (row, vec) in rows {
        let score = similarity(query, vec);
        // strict: an equal score never replaces an earlier row
        if score > best.score {
            best = HitEntry { row, score };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(len: usize, entries: Vec<(u32, f64)>) -> ZeroSpVec<f64> {
        let mut v = ZeroSpVec::from_entries(len, entries);
        v.normalize();
        v
    }

    #[test]
    fn picks_highest_similarity() {
        let corpus = vec![
            unit(3, vec![(0, 1.0)]),
            unit(3, vec![(1, 1.0), (2, 1.0)]),
            unit(3, vec![(2, 1.0)]),
        ];
        let query = unit(3, vec![(2, 1.0)]);
        let hit = best_match(&query, &corpus).unwrap();
        assert_eq!(hit.row, 2);
        assert!((hit.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ties_go_to_lowest_row() {
        let row = unit(2, vec![(0, 1.0), (1, 2.0)]);
        let corpus = vec![unit(2, vec![(0, 1.0)]), row.clone(), row.clone()];
        let hit = best_match(&row, &corpus).unwrap();
        assert_eq!(hit.row, 1);
    }

    #[test]
    fn zero_query_lands_on_first_row() {
        let corpus = vec![unit(2, vec![(1, 1.0)]), unit(2, vec![(0, 1.0)])];
        let hit = best_match(&ZeroSpVec::zeros(2), &corpus).unwrap();
        assert_eq!(hit.row, 0);
        assert_eq!(hit.score, 0.0);
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let query = unit(2, vec![(0, 1.0)]);
        assert!(matches!(best_match(&query, &[]), Err(Error::EmptyCorpus)));
    }

    #[test]
    fn similarity_is_orthogonal_zero() {
        let a = unit(4, vec![(0, 1.0), (1, 1.0)]);
        let b = unit(4, vec![(2, 1.0), (3, 1.0)]);
        assert_eq!(similarity(&a, &b), 0.0);
        assert!((similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn debug_alternate_is_compact() {
        let hit = HitEntry { row: 3, score: 0.5 };
        assert_eq!(format!("{hit:#?}"), "row 3: 0.500000");
    }
}
