//! Numeric kinds and the element-wise difference metric.
//!
//! Every element type the oracle can compare implements [`Element`]. Real
//! scalars (`f32`, `f64`) are their own real type; complex scalars
//! (`Complex<f32>`, `Complex<f64>`) report differences in their component type.
//!
//! The complex metric is the larger of the two component-wise absolute
//! differences, not the modulus of the complex difference: it bounds the worst
//! single-component error.

use num_complex::Complex;
use std::fmt;
use std::ops::{Add, Div, Sub};

// ---------------------------------------------------------------------------
// NumericKind
// ---------------------------------------------------------------------------

/// Runtime tag for the element types understood by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    F32,
    F64,
    ComplexF32,
    ComplexF64,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::ComplexF32 => write!(f, "complex<f32>"),
            Self::ComplexF64 => write!(f, "complex<f64>"),
        }
    }
}

impl NumericKind {
    /// All known numeric kinds.
    pub const ALL: &'static [NumericKind] =
        &[NumericKind::F32, NumericKind::F64, NumericKind::ComplexF32, NumericKind::ComplexF64];

    /// True for `f64` and complex numbers with `f64` components.
    pub fn is_double_precision(self) -> bool {
        matches!(self, Self::F64 | Self::ComplexF64)
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Self::ComplexF32 | Self::ComplexF64)
    }

    /// The real kind of one component (identity for real kinds).
    pub fn component(self) -> NumericKind {
        match self {
            Self::F32 | Self::ComplexF32 => Self::F32,
            Self::F64 | Self::ComplexF64 => Self::F64,
        }
    }

    /// Size in bytes of one real component.
    pub fn component_size(self) -> usize {
        match self.component() {
            Self::F32 => std::mem::size_of::<f32>(),
            _ => std::mem::size_of::<f64>(),
        }
    }
}

// ---------------------------------------------------------------------------
// Element / RealScalar
// ---------------------------------------------------------------------------

/// An element type that can be compared by the oracle.
pub trait Element: Copy + PartialEq + Send + Sync + fmt::Debug + 'static {
    /// Result type of the difference metric.
    type Real: RealScalar;

    const KIND: NumericKind;
    const ZERO: Self;

    /// Absolute difference between two elements.
    fn abs_diff(self, other: Self) -> Self::Real;

    /// Ordering key for the index-of-max-absolute-value scan: `|x|` for reals,
    /// `|re| + |im|` for complex values.
    fn abs_max_key(self) -> Self::Real;

    /// Distance of this element from zero under [`Element::abs_diff`].
    fn magnitude(self) -> Self::Real {
        Self::ZERO.abs_diff(self)
    }
}

/// A real scalar: the result type of every metric.
pub trait RealScalar:
    Element<Real = Self>
    + PartialOrd
    + fmt::Display
    + fmt::LowerExp
    + Add<Output = Self>
    + Sub<Output = Self>
    + Div<Output = Self>
{
    /// Largest finite value; the "maximally different" sentinel.
    const MAX: Self;

    /// Kind of a complex number with this component type.
    const COMPLEX_KIND: NumericKind;

    fn abs(self) -> Self;

    fn is_nan(self) -> bool;

    fn to_f64(self) -> f64;

    /// Pick the tolerance candidate matching this precision.
    fn select_tolerance(double_value: f64, single_value: f32) -> Self;

    /// Maximum in which NaN is absorbing, so `nan_max` is associative and
    /// commutative even when NaN shows up.
    fn nan_max(self, other: Self) -> Self {
        if other.is_nan() || other > self { other } else { self }
    }

    /// Minimum in which NaN is absorbing.
    fn nan_min(self, other: Self) -> Self {
        if other.is_nan() || other < self { other } else { self }
    }
}

macro_rules! impl_real_scalar {
    ($t:ident, $kind:expr, $complex_kind:expr) => {
        impl Element for $t {
            type Real = $t;

            const KIND: NumericKind = $kind;
            const ZERO: Self = 0.0;

            #[inline]
            fn abs_diff(self, other: Self) -> Self {
                (other - self).abs()
            }

            #[inline]
            fn abs_max_key(self) -> Self {
                self.abs()
            }
        }

        impl RealScalar for $t {
            const MAX: Self = <$t>::MAX;
            const COMPLEX_KIND: NumericKind = $complex_kind;

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            fn select_tolerance(double_value: f64, single_value: f32) -> Self {
                impl_real_scalar!(@select $t, double_value, single_value)
            }
        }
    };
    (@select f32, $double:ident, $single:ident) => {{
        let _ = $double;
        $single
    }};
    (@select f64, $double:ident, $single:ident) => {{
        let _ = $single;
        $double
    }};
}

impl_real_scalar!(f32, NumericKind::F32, NumericKind::ComplexF32);
impl_real_scalar!(f64, NumericKind::F64, NumericKind::ComplexF64);

impl<R: RealScalar> Element for Complex<R> {
    type Real = R;

    const KIND: NumericKind = R::COMPLEX_KIND;
    const ZERO: Self = Complex { re: R::ZERO, im: R::ZERO };

    #[inline]
    fn abs_diff(self, other: Self) -> R {
        let dr = self.re.abs_diff(other.re);
        let di = self.im.abs_diff(other.im);
        dr.nan_max(di)
    }

    #[inline]
    fn abs_max_key(self) -> R {
        self.re.abs() + self.im.abs()
    }
}
