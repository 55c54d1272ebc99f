//! Tolerance selection by element precision.
//!
//! Callers always supply both candidates; the element kind decides which one
//! applies. Complex kinds follow their component type.

use crate::scalar::{Element, NumericKind, RealScalar};

/// Select a tolerance for `kind` at runtime, widened to `f64`.
pub fn tolerance_for(kind: NumericKind, double_value: f64, single_value: f32) -> f64 {
    if kind.is_double_precision() { double_value } else { f64::from(single_value) }
}

/// Select a tolerance for element type `T`, in `T`'s real type.
///
/// ```rust
/// use oracle_common::{Complex32, Complex64, tolerance};
///
/// assert_eq!(tolerance::<f64>(1e-12, 1e-5), 1e-12);
/// assert_eq!(tolerance::<Complex64>(1e-12, 1e-5), 1e-12);
/// assert_eq!(tolerance::<Complex32>(1e-12, 1e-5), 1e-5f32);
/// ```
pub fn tolerance<T: Element>(double_value: f64, single_value: f32) -> T::Real {
    <T::Real as RealScalar>::select_tolerance(double_value, single_value)
}
