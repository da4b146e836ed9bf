pub mod math;
pub mod serde;

use std::fmt::{self, Debug};

use num::Num;

/// ZeroSpVecは0要素を疎とした過疎ベクトルです
/// Sparse vector that stores only the non-zero entries.
///
/// `inds` holds the column of each stored entry and `vals` its value.
/// Entries are kept in strictly ascending column order, every column is
/// `< len`, and zero values are never stored, so `nnz() == 0` means the
/// vector is the all-zero vector.
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// All-zero vector of dimension `len`
    #[inline]
    pub fn zeros(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build from `(column, value)` pairs in any order.
    ///
    /// Zero values are dropped. Columns must be unique and `< len`;
    /// callers build the pairs from a map keyed by column, so both hold.
    pub fn from_entries(len: usize, mut entries: Vec<(u32, N)>) -> Self {
        entries.retain(|(_, v)| !v.is_zero());
        entries.sort_unstable_by_key(|(idx, _)| *idx);
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0), "duplicate column");
        debug_assert!(entries.last().map_or(true, |(idx, _)| (*idx as usize) < len));

        let mut inds = Vec::with_capacity(entries.len());
        let mut vals = Vec::with_capacity(entries.len());
        for (idx, val) in entries {
            inds.push(idx);
            vals.push(val);
        }
        ZeroSpVec { inds, vals, len }
    }

    /// Build from entries that must already be sorted and in range.
    /// Used when decoding untrusted data.
    pub fn try_from_sorted(len: usize, entries: Vec<(u32, N)>) -> Result<Self, String> {
        let mut inds = Vec::with_capacity(entries.len());
        let mut vals = Vec::with_capacity(entries.len());
        for (idx, val) in entries {
            if idx as usize >= len {
                return Err(format!("column {idx} out of range for dimension {len}"));
            }
            if inds.last().map_or(false, |prev| *prev >= idx) {
                return Err(format!("column {idx} is not in ascending order"));
            }
            if val.is_zero() {
                continue;
            }
            inds.push(idx);
            vals.push(val);
        }
        Ok(ZeroSpVec { inds, vals, len })
    }

    /// Dimension of the vector
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// `true` for the all-zero vector
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at `index`, zero if it is not stored
    #[inline]
    pub fn get(&self, index: usize) -> N {
        match u32::try_from(index) {
            Ok(target) => match self.inds.binary_search(&target) {
                Ok(pos) => self.vals[pos],
                Err(_) => N::zero(),
            },
            Err(_) => N::zero(),
        }
    }

    /// Iterate over stored entries in ascending column order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(idx, val)| (*idx as usize, *val))
    }

    #[inline]
    pub fn as_ind_slice(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn as_val_slice(&self) -> &[N] {
        &self.vals
    }

    /// Dense copy, mostly for inspection and tests
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = val;
        }
        dense
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    /// drop every entry, keeping the dimension
    #[inline]
    pub fn clear(&mut self) {
        self.inds.clear();
        self.vals.clear();
    }
}

impl<N: Num + Copy + Debug> Debug for ZeroSpVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "ZeroSpVec({:?})", self.to_dense())
        } else {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("entries", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_sorts_and_drops_zeros() {
        let v = ZeroSpVec::from_entries(6, vec![(4, 2.0_f64), (1, 0.0), (0, 1.5)]);
        assert_eq!(v.len(), 6);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.as_ind_slice(), &[0, 4]);
        assert_eq!(v.to_dense(), vec![1.5, 0.0, 0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn get_returns_zero_for_missing_columns() {
        let v = ZeroSpVec::from_entries(3, vec![(2, 7.0_f32)]);
        assert_eq!(v.get(2), 7.0);
        assert_eq!(v.get(0), 0.0);
        assert_eq!(v.get(100), 0.0);
    }

    #[test]
    fn zeros_is_zero() {
        let v: ZeroSpVec<f64> = ZeroSpVec::zeros(4);
        assert!(v.is_zero());
        assert!(!v.is_empty());
        assert_eq!(v.to_dense(), vec![0.0; 4]);
    }

    #[test]
    fn try_from_sorted_rejects_bad_layouts() {
        assert!(ZeroSpVec::try_from_sorted(3, vec![(0, 1.0_f64), (2, 1.0)]).is_ok());
        assert!(ZeroSpVec::try_from_sorted(3, vec![(2, 1.0_f64), (1, 1.0)]).is_err());
        assert!(ZeroSpVec::try_from_sorted(3, vec![(1, 1.0_f64), (1, 1.0)]).is_err());
        assert!(ZeroSpVec::try_from_sorted(3, vec![(3, 1.0_f64)]).is_err());
    }
}
