//! Gold-vs-actual comparators for vectors and matrices.
//!
//! Three questions are answered for rank-1 and rank-2 operands:
//!
//! - **exact equality**: `is_same_vector`, `is_same_matrix`
//! - **absolute difference**: largest element-wise [`Element::abs_diff`]
//! - **relative difference**: absolute difference over the smaller of the two
//!   max-magnitude elements
//!
//! Every function accepts views and owning sequences interchangeably through
//! [`AsVectorView`] and [`AsMatrixView`], and every metric is symmetric in its
//! operands. Mismatched extents never fault: equality is `false` and the
//! metrics return `Real::MAX`.
//!
//! ```rust
//! use oracle_compare::{is_same_vector, vector_abs_diff, vector_rel_diff};
//!
//! let gold = vec![2.0f64, 0.0];
//! let actual = [1.0f64, 0.0];
//! assert!(!is_same_vector(&gold, &actual));
//! assert_eq!(vector_abs_diff(&gold, &actual), 1.0);
//! assert_eq!(vector_rel_diff(&gold, &actual), 1.0);
//! ```
//!
//! [`Element::abs_diff`]: oracle_common::Element::abs_diff

pub mod matrix;
pub mod vector;
pub mod view;

pub use matrix::{MatrixComparator, is_same_matrix, matrix_abs_diff, matrix_rel_diff};
pub use vector::{
    VectorComparator, idx_abs_max, is_same_vector, relative_difference, vector_abs_diff,
    vector_rel_diff,
};
pub use view::{
    AsMatrixView, AsVectorView, Matrix, MatrixView, MatrixViewMut, VectorView, VectorViewMut,
};
