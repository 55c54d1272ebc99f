//! Reduction combiners.
//!
//! Each combiner is a commutative monoid: `identity` is neutral and `combine`
//! is associative and commutative. The parallel engine relies on nothing else.

use oracle_common::RealScalar;
use std::marker::PhantomData;

/// An associative, commutative binary operator with an identity element.
pub trait Combiner: Send + Sync {
    type Output: Send + Sync + Clone;

    /// Neutral element used to initialise every partial accumulator.
    fn identity(&self) -> Self::Output;

    /// Merge two partial results.
    fn combine(&self, a: Self::Output, b: Self::Output) -> Self::Output;
}

/// Logical OR over "differs" flags. Identity is `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalOr;

impl Combiner for LogicalOr {
    type Output = bool;

    fn identity(&self) -> bool {
        false
    }

    fn combine(&self, a: bool, b: bool) -> bool {
        a || b
    }
}

/// Numeric maximum over non-negative metric values. Identity is zero.
///
/// NaN is absorbing: once any index yields NaN the reduction yields NaN, so a
/// NaN difference can never be masked by a finite one.
#[derive(Debug, Clone, Copy)]
pub struct Max<R>(PhantomData<fn() -> R>);

impl<R> Max<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R> Default for Max<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RealScalar> Combiner for Max<R> {
    type Output = R;

    fn identity(&self) -> R {
        R::ZERO
    }

    fn combine(&self, a: R, b: R) -> R {
        a.nan_max(b)
    }
}

/// Index of the largest key; ties resolve to the lowest index.
///
/// Partial values are `Option<(index, key)>` with `None` as identity. A NaN
/// key ranks above every number, so a NaN element becomes the maximum.
#[derive(Debug, Clone, Copy)]
pub struct ArgMax<R>(PhantomData<fn() -> R>);

impl<R> ArgMax<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R> Default for ArgMax<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RealScalar> ArgMax<R> {
    fn ranks_above(a: R, b: R) -> bool {
        (a.is_nan() && !b.is_nan()) || a > b
    }
}

impl<R: RealScalar> Combiner for ArgMax<R> {
    type Output = Option<(usize, R)>;

    fn identity(&self) -> Self::Output {
        None
    }

    fn combine(&self, a: Self::Output, b: Self::Output) -> Self::Output {
        match (a, b) {
            (None, other) | (other, None) => other,
            (Some((ia, ka)), Some((ib, kb))) => {
                if Self::ranks_above(ka, kb) {
                    Some((ia, ka))
                } else if Self::ranks_above(kb, ka) {
                    Some((ib, kb))
                } else if ia <= ib {
                    Some((ia, ka))
                } else {
                    Some((ib, kb))
                }
            }
        }
    }
}
