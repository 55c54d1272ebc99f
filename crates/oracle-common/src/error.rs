//! Error types for linalg-oracle.
//!
//! Comparison functions are total and never return errors. [`OracleError`]
//! covers the fallible edges: view construction, owning-matrix construction,
//! configuration parsing and thread pool creation.

use thiserror::Error;

/// Errors produced while building views, matrices, pools or configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("invalid view: {reason}")]
    InvalidView { reason: String },

    #[error("matrix storage length mismatch: expected {expected} ({rows}x{cols}), got {actual}")]
    LengthMismatch { expected: usize, rows: usize, cols: usize, actual: usize },

    #[error("invalid value {value:?} for {key}: {reason}")]
    Config { key: &'static str, value: String, reason: String },

    #[error("failed to build reduction thread pool: {0}")]
    ThreadPool(String),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, OracleError>;
