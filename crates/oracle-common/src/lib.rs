//! Common types for linalg-oracle
//!
//! This crate provides the foundational pieces shared by the reduction engine,
//! the comparators and the test harness: numeric kinds and the scalar
//! difference metric, tolerance selection, the error type and the runtime
//! configuration.

pub mod config;
pub mod error;
pub mod scalar;
pub mod tolerance;

pub use config::OracleConfig;
pub use error::{OracleError, Result};
pub use scalar::{Element, NumericKind, RealScalar};
pub use tolerance::{tolerance, tolerance_for};

pub use num_complex::{Complex, Complex32, Complex64};
