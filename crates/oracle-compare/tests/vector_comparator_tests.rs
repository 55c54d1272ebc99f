//! Rank-1 comparator behaviour across views, sequences and element kinds.

use oracle_common::{Complex32, Complex64};
use oracle_compare::{
    VectorComparator, VectorView, VectorViewMut, idx_abs_max, is_same_vector, vector_abs_diff,
    vector_rel_diff,
};
use oracle_reduce::ReductionPool;

#[test]
fn mismatched_extent_is_never_same() {
    let v1 = vec![1.0f64, 2.0, 3.0];
    let v2 = vec![1.0f64, 2.0, 3.0, 4.0];
    assert!(!is_same_vector(&v1, &v2));
    assert!(!is_same_vector(&v2, &v1));
}

#[test]
fn mismatched_extent_metrics_are_sentinel() {
    let v1 = vec![1.0f64, 2.0, 3.0];
    let v2 = vec![1.0f64, 2.0, 3.0, 4.0];
    assert_eq!(vector_abs_diff(&v1, &v2), f64::MAX);
    assert_eq!(vector_rel_diff(&v1, &v2), f64::MAX);

    let w1 = [1.0f32];
    let w2: [f32; 0] = [];
    assert_eq!(vector_abs_diff(&w1, &w2), f32::MAX);
    assert_eq!(vector_rel_diff(&w2, &w1), f32::MAX);
}

#[test]
fn identical_vectors_are_same_with_zero_metrics() {
    let v = vec![0.5f64, -1.25, 8.0, 1.0e-300];
    assert!(is_same_vector(&v, &v.clone()));
    assert_eq!(vector_abs_diff(&v, &v), 0.0);
    assert_eq!(vector_rel_diff(&v, &v), 0.0);
}

#[test]
fn empty_vectors_compare_equal() {
    let a: Vec<f64> = Vec::new();
    let b: [f64; 0] = [];
    assert!(is_same_vector(&a, &b));
    assert_eq!(vector_abs_diff(&a, &b), 0.0);
    assert_eq!(vector_rel_diff(&a, &b), 0.0);
}

#[test]
fn one_zero_norm_reports_absolute_difference() {
    let v1 = [0.0f64, 0.0];
    let v2 = [1.0f64, 0.0];
    assert_eq!(vector_abs_diff(&v1, &v2), 1.0);
    assert_eq!(vector_rel_diff(&v1, &v2), 1.0);
    assert_eq!(vector_rel_diff(&v2, &v1), 1.0);
}

#[test]
fn relative_difference_divides_by_smaller_norm() {
    let v1 = [2.0f64, 0.0];
    let v2 = [1.0f64, 0.0];
    assert_eq!(vector_abs_diff(&v1, &v2), 1.0);
    assert_eq!(vector_rel_diff(&v1, &v2), 1.0);
    assert_eq!(vector_rel_diff(&v2, &v1), 1.0);

    let v3 = [4.0f64, -1.0];
    let v4 = [3.0f64, -2.0];
    // abs diff 1, norms 4 and 3
    assert_eq!(vector_rel_diff(&v3, &v4), 1.0 / 3.0);
}

#[test]
fn single_precision_uses_f32_arithmetic() {
    let v1 = [1.5f32, -2.0];
    let v2 = [1.0f32, -2.0];
    let d: f32 = vector_abs_diff(&v1, &v2);
    assert_eq!(d, 0.5);
    assert_eq!(vector_rel_diff(&v1, &v2), 0.5 / 2.0);
}

#[test]
fn nan_difference_propagates() {
    let v1 = [1.0f64, f64::NAN, 3.0];
    let v2 = [1.0f64, 2.0, 3.0];
    assert!(!is_same_vector(&v1, &v2));
    assert!(vector_abs_diff(&v1, &v2).is_nan());
    assert!(!(vector_rel_diff(&v1, &v2) <= 1.0));
}

#[test]
fn complex_metric_uses_component_differences() {
    let v1 = [Complex64::new(3.0, 4.0)];
    let v2 = [Complex64::new(0.0, 0.0)];
    assert_eq!(vector_abs_diff(&v1, &v2), 4.0);
    // norm of v2 is zero, so the absolute difference is reported
    assert_eq!(vector_rel_diff(&v1, &v2), 4.0);

    // both norms are |0 + 2i| = 2
    let v3 = [Complex64::new(0.0, 2.0), Complex64::new(1.0, 0.0)];
    let v4 = [Complex64::new(0.0, 2.0), Complex64::new(1.5, 0.0)];
    assert_eq!(vector_abs_diff(&v3, &v4), 0.5);
    assert_eq!(vector_rel_diff(&v3, &v4), 0.25);
}

#[test]
fn complex_single_precision_equality() {
    let v1 = vec![Complex32::new(1.0, -1.0), Complex32::new(0.0, 0.5)];
    let mut v2 = v1.clone();
    assert!(is_same_vector(&v1, &v2));
    v2[1].im = 0.25;
    assert!(!is_same_vector(&v1, &v2));
    assert_eq!(vector_abs_diff(&v1, &v2), 0.25f32);
}

#[test]
fn views_and_sequences_mix_freely() {
    let seq = vec![1.0f64, 2.0, 3.0];
    let storage = [1.0f64, 9.0, 2.0, 9.0, 3.0, 9.0];
    let strided = VectorView::strided(&storage, 3, 2).unwrap();

    assert!(is_same_vector(&seq, &strided));
    assert!(is_same_vector(&strided, &seq));
    assert!(is_same_vector(&strided, &[1.0f64, 2.0, 3.0]));
    assert!(is_same_vector(&strided, &strided));
    assert_eq!(vector_abs_diff(&strided, &seq), 0.0);

    let mut other = [1.0f64, 2.0, 3.5];
    let view_mut = VectorViewMut::new(&mut other);
    assert!(!is_same_vector(&view_mut, &seq));
    assert_eq!(vector_abs_diff(&seq, &view_mut), 0.5);
}

#[test]
fn idx_abs_max_follows_component_sum_for_complex() {
    // |re| + |im|: 3, 4, 4
    let v = [Complex64::new(3.0, 0.0), Complex64::new(2.0, -2.0), Complex64::new(0.0, 4.0)];
    assert_eq!(idx_abs_max(&v), Some(1));
}

#[test]
fn comparator_on_dedicated_pool_matches_global() {
    let pool = ReductionPool::with_threads(4).unwrap();
    let cmp = VectorComparator::new(&pool);
    assert!(std::ptr::eq(cmp.pool(), &pool));
    assert_eq!(cmp.pool().num_threads(), 4);
    let v1: Vec<f64> = (0..10_000).map(|i| (i as f64).sin()).collect();
    let mut v2 = v1.clone();
    v2[7_321] += 0.125;

    let a = VectorView::new(&v1);
    let b = VectorView::new(&v2);
    assert!(!cmp.is_same(a, b));
    assert_eq!(cmp.abs_diff(a, b), vector_abs_diff(&v1, &v2));
    assert_eq!(cmp.rel_diff(a, b), vector_rel_diff(&v1, &v2));
}
