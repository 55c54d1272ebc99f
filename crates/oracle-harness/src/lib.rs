//! Test harness for numerical kernels.
//!
//! - [`gate`]: skip test cases whose element kind the array substrate cannot
//!   exchange, while still recording the kernel as exercised.
//! - [`driver`]: verify in-place matrix kernels against a gold computation and
//!   check that read-only operands were left untouched.
//!
//! ```rust
//! use oracle_compare::Matrix;
//! use oracle_harness::{TestId, run_checked, verify_mutating_op};
//!
//! let id = TestId::for_element::<f64>("test_", "scal_rows", "");
//! run_checked::<f64, _>(&id, || {
//!     let mut a = Matrix::from_vec(vec![1.0f64, 2.0, 3.0, 4.0], 2, 2).unwrap();
//!     let mut x = vec![2.0f64, 3.0];
//!     verify_mutating_op(
//!         &mut a,
//!         &mut x,
//!         1e-12,
//!         |mut gold, x| {
//!             for i in 0..2 {
//!                 for j in 0..2 {
//!                     gold[(i, j)] *= x[i];
//!                 }
//!             }
//!         },
//!         |a, x| {
//!             for i in 0..2 {
//!                 for j in 0..2 {
//!                     a[(i, j)] *= x[i];
//!                 }
//!             }
//!         },
//!     )
//! })
//! .assert_ok();
//! ```

pub mod dispatch;
pub mod driver;
pub mod gate;
pub mod outcome;

pub use dispatch::{DispatchRegistry, DispatchTracker, global_registry};
pub use driver::{snapshot_matrix_rowwise, snapshot_vector, verify_mutating_op, verify_mutating_op2};
pub use gate::{CapabilityCheck, CapabilityGate, SubstrateLayout, run_checked, run_guarded};
pub use outcome::{OracleFailure, SkipNotice, TestId, TestOutcome};
