//! Rank-2 comparisons.
//!
//! Equality walks rows in parallel and scans each row's columns on one worker,
//! so it works for any strides. The metrics flatten both operands into
//! `rows * cols` element vectors and reuse the vector comparator, which is
//! only meaningful when both operands are contiguous with the same element
//! ordering (see [`MatrixView::flatten`]).

use crate::vector::VectorComparator;
use crate::view::{AsMatrixView, MatrixView};
use oracle_common::{Element, RealScalar};
use oracle_reduce::{LogicalOr, ReductionPool};

/// Matrix comparisons evaluated on a specific [`ReductionPool`].
#[derive(Debug, Clone, Copy)]
pub struct MatrixComparator<'p> {
    pool: &'p ReductionPool,
}

impl MatrixComparator<'static> {
    /// Comparator running on the process-wide pool.
    pub fn global() -> Self {
        Self::new(oracle_reduce::global())
    }
}

impl<'p> MatrixComparator<'p> {
    pub fn new(pool: &'p ReductionPool) -> Self {
        Self { pool }
    }

    fn vectors(&self) -> VectorComparator<'p> {
        VectorComparator::new(self.pool)
    }

    /// True when both extents match and every pair of elements compares equal.
    pub fn is_same<T, U>(&self, a: MatrixView<'_, T>, b: MatrixView<'_, U>) -> bool
    where
        T: PartialEq<U> + Sync,
        U: Sync,
    {
        if a.extents() != b.extents() {
            tracing::debug!(left = ?a.extents(), right = ?b.extents(), "matrix extents differ");
            return false;
        }
        let cols = a.cols();
        let differs = self.pool.reduce(0..a.rows(), &LogicalOr, |i| {
            let mut row_differs = false;
            for j in 0..cols {
                row_differs = row_differs || a[(i, j)] != b[(i, j)];
            }
            row_differs
        });
        !differs
    }

    /// Largest element-wise absolute difference, or `Real::MAX` when the
    /// extents differ.
    pub fn abs_diff<T: Element>(&self, a: MatrixView<'_, T>, b: MatrixView<'_, T>) -> T::Real {
        if a.extents() != b.extents() {
            tracing::debug!(left = ?a.extents(), right = ?b.extents(), "matrix extents differ");
            return <T::Real as RealScalar>::MAX;
        }
        let (fa, fb) = flatten_pair(a, b);
        self.vectors().abs_diff(fa, fb)
    }

    /// Relative difference over the flattened operands, or `Real::MAX` when
    /// the extents differ.
    pub fn rel_diff<T: Element>(&self, a: MatrixView<'_, T>, b: MatrixView<'_, T>) -> T::Real {
        if a.extents() != b.extents() {
            tracing::debug!(left = ?a.extents(), right = ?b.extents(), "matrix extents differ");
            return <T::Real as RealScalar>::MAX;
        }
        let (fa, fb) = flatten_pair(a, b);
        self.vectors().rel_diff(fa, fb)
    }
}

fn flatten_pair<'a, 'b, T>(
    a: MatrixView<'a, T>,
    b: MatrixView<'b, T>,
) -> (crate::VectorView<'a, T>, crate::VectorView<'b, T>) {
    debug_assert!(
        (a.is_row_major_contiguous() && b.is_row_major_contiguous())
            || (a.is_col_major_contiguous() && b.is_col_major_contiguous()),
        "flattened comparison requires both matrices to share one contiguous layout"
    );
    (a.flatten(), b.flatten())
}

/// Exact element-wise equality of two rank-2 operands.
pub fn is_same_matrix<A, B>(a: &A, b: &B) -> bool
where
    A: AsMatrixView + ?Sized,
    B: AsMatrixView + ?Sized,
    A::Elem: PartialEq<B::Elem> + Sync,
    B::Elem: Sync,
{
    MatrixComparator::global().is_same(a.as_matrix_view(), b.as_matrix_view())
}

/// Largest element-wise absolute difference of two rank-2 operands.
///
/// ```rust
/// use oracle_compare::{Matrix, matrix_abs_diff};
///
/// let a = Matrix::from_vec(vec![1.0f64, 2.0, 3.0, 4.0], 2, 2).unwrap();
/// let b = Matrix::from_vec(vec![1.0f64, 2.0, 3.0, 5.0], 2, 2).unwrap();
/// assert_eq!(matrix_abs_diff(&a, &b), 1.0);
/// ```
pub fn matrix_abs_diff<A, B, T>(a: &A, b: &B) -> T::Real
where
    A: AsMatrixView<Elem = T> + ?Sized,
    B: AsMatrixView<Elem = T> + ?Sized,
    T: Element,
{
    MatrixComparator::global().abs_diff(a.as_matrix_view(), b.as_matrix_view())
}

/// Relative difference of two rank-2 operands.
pub fn matrix_rel_diff<A, B, T>(a: &A, b: &B) -> T::Real
where
    A: AsMatrixView<Elem = T> + ?Sized,
    B: AsMatrixView<Elem = T> + ?Sized,
    T: Element,
{
    MatrixComparator::global().rel_diff(a.as_matrix_view(), b.as_matrix_view())
}
