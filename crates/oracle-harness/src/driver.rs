//! Verification driver for kernels that update a matrix in place.
//!
//! One invocation snapshots the read-only operands, computes a gold result on
//! a private row-major copy of the primary operand, runs the kernel once, and
//! then checks two things: the primary operand matches the gold result within
//! the relative tolerance, and every read-only operand is bit-for-bit intact.
//! All violated checks are collected into the returned [`TestOutcome`].

use crate::outcome::{OracleFailure, TestOutcome};
use oracle_common::{Element, RealScalar};
use oracle_compare::{
    AsMatrixView, AsVectorView, Matrix, MatrixViewMut, VectorView, is_same_vector,
    matrix_rel_diff, vector_abs_diff,
};

/// Owning copy of a rank-1 operand.
pub fn snapshot_vector<V>(v: &V) -> Vec<V::Elem>
where
    V: AsVectorView + ?Sized,
    V::Elem: Clone,
{
    v.as_vector_view().to_vec()
}

/// Owning row-major copy of a rank-2 operand, whatever its layout.
pub fn snapshot_matrix_rowwise<M>(m: &M) -> Matrix<M::Elem>
where
    M: AsMatrixView + ?Sized,
    M::Elem: Clone,
{
    let view = m.as_matrix_view();
    Matrix::from_fn(view.rows(), view.cols(), |i, j| view[(i, j)].clone())
}

/// Verify a kernel that updates `a` in place and only reads `x`.
///
/// `gold_fn` receives a mutable row-major copy of `a` and a view of `x` and
/// must apply the reference update. `action` runs the kernel under test on the
/// real operands exactly once.
///
/// ```rust
/// use oracle_compare::Matrix;
/// use oracle_harness::verify_mutating_op;
///
/// let mut a = Matrix::from_vec(vec![1.0f64, 0.0, 0.0, 1.0], 2, 2).unwrap();
/// let mut x = vec![1.0f64, 1.0];
/// let outcome = verify_mutating_op(
///     &mut a,
///     &mut x,
///     1e-12,
///     |mut gold, x| {
///         for i in 0..2 {
///             for j in 0..2 {
///                 gold[(i, j)] += x[i] * x[j];
///             }
///         }
///     },
///     |a, x| {
///         for i in 0..2 {
///             for j in 0..2 {
///                 a[(i, j)] += x[i] * x[j];
///             }
///         }
///     },
/// );
/// outcome.assert_ok();
/// ```
#[must_use]
pub fn verify_mutating_op<A, X, T, G, K>(
    a: &mut A,
    x: &mut X,
    tolerance: T::Real,
    gold_fn: G,
    action: K,
) -> TestOutcome
where
    A: AsMatrixView<Elem = T> + ?Sized,
    X: AsVectorView<Elem = T> + ?Sized,
    T: Element,
    G: FnOnce(MatrixViewMut<'_, T>, VectorView<'_, T>),
    K: FnOnce(&mut A, &mut X),
{
    let x_before = snapshot_vector(&*x);
    let mut gold = snapshot_matrix_rowwise(&*a);
    gold_fn(gold.view_mut(), VectorView::new(&x_before));

    action(a, x);

    let mut failures = Vec::new();
    check_primary("A", &gold, &*a, tolerance, &mut failures);
    check_unchanged("x", &*x, &x_before, &mut failures);
    finish(failures)
}

/// [`verify_mutating_op`] for kernels with two read-only vectors `x` and `y`.
#[must_use]
pub fn verify_mutating_op2<A, X, Y, T, G, K>(
    a: &mut A,
    x: &mut X,
    y: &mut Y,
    tolerance: T::Real,
    gold_fn: G,
    action: K,
) -> TestOutcome
where
    A: AsMatrixView<Elem = T> + ?Sized,
    X: AsVectorView<Elem = T> + ?Sized,
    Y: AsVectorView<Elem = T> + ?Sized,
    T: Element,
    G: FnOnce(MatrixViewMut<'_, T>, VectorView<'_, T>, VectorView<'_, T>),
    K: FnOnce(&mut A, &mut X, &mut Y),
{
    let x_before = snapshot_vector(&*x);
    let y_before = snapshot_vector(&*y);
    let mut gold = snapshot_matrix_rowwise(&*a);
    gold_fn(gold.view_mut(), VectorView::new(&x_before), VectorView::new(&y_before));

    action(a, x, y);

    let mut failures = Vec::new();
    check_primary("A", &gold, &*a, tolerance, &mut failures);
    check_unchanged("x", &*x, &x_before, &mut failures);
    check_unchanged("y", &*y, &y_before, &mut failures);
    finish(failures)
}

fn check_primary<A, T>(
    operand: &'static str,
    gold: &Matrix<T>,
    actual: &A,
    tolerance: T::Real,
    failures: &mut Vec<OracleFailure>,
) where
    A: AsMatrixView<Elem = T> + ?Sized,
    T: Element,
{
    let view = actual.as_matrix_view();
    // the gold copy is row-major, so the metric needs the same ordering
    let rel_diff = if view.is_row_major_contiguous() {
        matrix_rel_diff(gold, &view)
    } else {
        matrix_rel_diff(gold, &snapshot_matrix_rowwise(&view))
    };

    // NaN fails
    if !(rel_diff <= tolerance) {
        failures.push(OracleFailure::ToleranceExceeded {
            operand,
            rel_diff: rel_diff.to_f64(),
            tolerance: tolerance.to_f64(),
        });
    }
}

fn check_unchanged<X, T>(
    operand: &'static str,
    current: &X,
    before: &[T],
    failures: &mut Vec<OracleFailure>,
) where
    X: AsVectorView<Elem = T> + ?Sized,
    T: Element,
{
    if !is_same_vector(current, before) {
        failures.push(OracleFailure::OperandMutated {
            operand,
            abs_diff: vector_abs_diff(current, before).to_f64(),
        });
    }
}

fn finish(failures: Vec<OracleFailure>) -> TestOutcome {
    for failure in &failures {
        tracing::error!(%failure, "oracle verification failed");
    }
    if failures.is_empty() {
        tracing::debug!("oracle verification passed");
    }
    TestOutcome::from_failures(failures)
}
