//! Rank-1 comparisons: exact equality, absolute and relative difference.
//!
//! All operations are total. Operands of different extents short-circuit
//! before any reduction runs: equality reports `false`, the metrics report the
//! sentinel `Real::MAX`.

use crate::view::{AsVectorView, VectorView};
use oracle_common::{Element, RealScalar};
use oracle_reduce::{ArgMax, LogicalOr, Max, ReductionPool};

/// Combine an absolute difference with the two operands' norms.
///
/// Both norms zero gives zero; exactly one zero gives the absolute difference
/// unchanged; otherwise the absolute difference is divided by the smaller
/// norm, which reports the larger of the two possible relative errors.
pub fn relative_difference<R: RealScalar>(abs_diff: R, norm1: R, norm2: R) -> R {
    let zero = R::ZERO;
    match (norm1 == zero, norm2 == zero) {
        (true, true) => zero,
        (true, false) | (false, true) => abs_diff,
        (false, false) => abs_diff / norm1.nan_min(norm2),
    }
}

/// Vector comparisons evaluated on a specific [`ReductionPool`].
#[derive(Debug, Clone, Copy)]
pub struct VectorComparator<'p> {
    pool: &'p ReductionPool,
}

impl VectorComparator<'static> {
    /// Comparator running on the process-wide pool.
    pub fn global() -> Self {
        Self::new(oracle_reduce::global())
    }
}

impl<'p> VectorComparator<'p> {
    pub fn new(pool: &'p ReductionPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &'p ReductionPool {
        self.pool
    }

    /// True when both views have the same extent and every pair of elements
    /// compares equal.
    pub fn is_same<T, U>(&self, v1: VectorView<'_, T>, v2: VectorView<'_, U>) -> bool
    where
        T: PartialEq<U> + Sync,
        U: Sync,
    {
        if v1.len() != v2.len() {
            tracing::debug!(left = v1.len(), right = v2.len(), "vector extents differ");
            return false;
        }
        let differs = self.pool.reduce(0..v1.len(), &LogicalOr, |i| v1[i] != v2[i]);
        !differs
    }

    /// Largest element-wise [`Element::abs_diff`], or `Real::MAX` when the
    /// extents differ.
    pub fn abs_diff<T: Element>(&self, v1: VectorView<'_, T>, v2: VectorView<'_, T>) -> T::Real {
        if v1.len() != v2.len() {
            tracing::debug!(left = v1.len(), right = v2.len(), "vector extents differ");
            return <T::Real as RealScalar>::MAX;
        }
        self.pool.reduce(0..v1.len(), &Max::<T::Real>::new(), |i| v1[i].abs_diff(v2[i]))
    }

    /// Absolute difference scaled by the smaller operand norm; see
    /// [`relative_difference`]. `Real::MAX` when the extents differ.
    pub fn rel_diff<T: Element>(&self, v1: VectorView<'_, T>, v2: VectorView<'_, T>) -> T::Real {
        if v1.len() != v2.len() {
            tracing::debug!(left = v1.len(), right = v2.len(), "vector extents differ");
            return <T::Real as RealScalar>::MAX;
        }
        let abs_diff = self.abs_diff(v1, v2);
        let norm1 = self.norm(v1);
        let norm2 = self.norm(v2);
        relative_difference(abs_diff, norm1, norm2)
    }

    /// Index of the element with the largest `abs_max_key`, first one on ties.
    pub fn idx_abs_max<T: Element>(&self, v: VectorView<'_, T>) -> Option<usize> {
        self.pool
            .reduce(0..v.len(), &ArgMax::<T::Real>::new(), |i| Some((i, v[i].abs_max_key())))
            .map(|(i, _)| i)
    }

    /// Magnitude of the max-magnitude element; zero for an empty view.
    pub fn norm<T: Element>(&self, v: VectorView<'_, T>) -> T::Real {
        match self.idx_abs_max(v) {
            Some(i) => v[i].magnitude(),
            None => <T::Real as Element>::ZERO,
        }
    }
}

/// Exact element-wise equality of two rank-1 operands.
///
/// ```rust
/// use oracle_compare::is_same_vector;
///
/// assert!(is_same_vector(&[1.0f64, 2.0], &vec![1.0f64, 2.0]));
/// assert!(!is_same_vector(&[1.0f64, 2.0, 3.0], &[1.0f64, 2.0]));
/// ```
pub fn is_same_vector<A, B>(v1: &A, v2: &B) -> bool
where
    A: AsVectorView + ?Sized,
    B: AsVectorView + ?Sized,
    A::Elem: PartialEq<B::Elem> + Sync,
    B::Elem: Sync,
{
    VectorComparator::global().is_same(v1.as_vector_view(), v2.as_vector_view())
}

/// Largest element-wise absolute difference of two rank-1 operands.
pub fn vector_abs_diff<A, B, T>(v1: &A, v2: &B) -> T::Real
where
    A: AsVectorView<Elem = T> + ?Sized,
    B: AsVectorView<Elem = T> + ?Sized,
    T: Element,
{
    VectorComparator::global().abs_diff(v1.as_vector_view(), v2.as_vector_view())
}

/// Relative difference of two rank-1 operands.
///
/// ```rust
/// use oracle_compare::vector_rel_diff;
///
/// assert_eq!(vector_rel_diff(&[2.0f64, 0.0], &[1.0, 0.0]), 1.0);
/// assert_eq!(vector_rel_diff(&[0.0f64, 0.0], &[0.0, 0.0]), 0.0);
/// ```
pub fn vector_rel_diff<A, B, T>(v1: &A, v2: &B) -> T::Real
where
    A: AsVectorView<Elem = T> + ?Sized,
    B: AsVectorView<Elem = T> + ?Sized,
    T: Element,
{
    VectorComparator::global().rel_diff(v1.as_vector_view(), v2.as_vector_view())
}

/// Index of the max-magnitude element of a rank-1 operand.
pub fn idx_abs_max<A, T>(v: &A) -> Option<usize>
where
    A: AsVectorView<Elem = T> + ?Sized,
    T: Element,
{
    VectorComparator::global().idx_abs_max(v.as_vector_view())
}
