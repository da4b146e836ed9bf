use std::{cmp::Ordering, ops::AddAssign};

use num::{Float, Num};

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// ドット積を計算するメソッド
    /// Sparse dot product, merge-joining the two sorted column lists.
    ///
    /// # Arguments
    /// * `other` - 他のベクトル
    ///
    /// # Returns
    /// * `R` - ドット積の結果
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let (self_inds, self_vals) = (self.as_ind_slice(), self.as_val_slice());
        let (other_inds, other_vals) = (other.as_ind_slice(), other.as_val_slice());

        let mut i = 0;
        let mut j = 0;
        while i < self_inds.len() && j < other_inds.len() {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    result += self_vals[i].into() * other_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for val in self.as_val_slice() {
            let val: R = (*val).into();
            result += val * val;
        }
        result
    }
}

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> N {
        self.as_val_slice()
            .iter()
            .fold(N::zero(), |acc, v| acc + *v * *v)
            .sqrt()
    }

    /// L2正規化
    /// Scale to unit length in place and return the norm it had before.
    /// A vector with zero (or non-finite) norm becomes the all-zero vector.
    pub fn normalize(&mut self) -> N {
        let norm = self.norm();
        if norm.is_zero() || !norm.is_finite() {
            self.clear();
            return norm;
        }
        for val in self.vals_mut() {
            *val = *val / norm;
        }
        norm
    }

    #[inline]
    fn vals_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }
}
