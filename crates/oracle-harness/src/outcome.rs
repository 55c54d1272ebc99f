//! Results reported by the gate and the verification driver.

use oracle_common::Element;
use std::fmt;
use thiserror::Error;

/// Identifies one test case: a kernel under a given element type.
///
/// Displayed as `{prefix}{kernel}{postfix} [{type_spec}]`, e.g.
/// `test_ger_rank1 [complex<f32>]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestId {
    pub prefix: String,
    pub kernel: String,
    pub postfix: String,
    pub type_spec: String,
}

impl TestId {
    pub fn new(
        prefix: impl Into<String>,
        kernel: impl Into<String>,
        postfix: impl Into<String>,
        type_spec: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            kernel: kernel.into(),
            postfix: postfix.into(),
            type_spec: type_spec.into(),
        }
    }

    /// Id whose type spec is the numeric kind of `T`.
    pub fn for_element<T: Element>(
        prefix: impl Into<String>,
        kernel: impl Into<String>,
        postfix: impl Into<String>,
    ) -> Self {
        Self::new(prefix, kernel, postfix, T::KIND.to_string())
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{} [{}]", self.prefix, self.kernel, self.postfix, self.type_spec)
    }
}

/// Why a test case was not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipNotice {
    pub test: TestId,
    pub reason: String,
}

impl fmt::Display for SkipNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped {}: {}", self.test, self.reason)
    }
}

/// A single violated verification check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleFailure {
    #[error("{operand}: relative difference {rel_diff:e} exceeds tolerance {tolerance:e}")]
    ToleranceExceeded { operand: &'static str, rel_diff: f64, tolerance: f64 },

    #[error("{operand}: read-only operand was modified (max abs difference {abs_diff:e})")]
    OperandMutated { operand: &'static str, abs_diff: f64 },
}

/// Result of one verified test case.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a failed outcome is only reported through `assert_ok` or an explicit check"]
pub enum TestOutcome {
    Passed,
    Failed(Vec<OracleFailure>),
    Skipped(SkipNotice),
}

impl TestOutcome {
    /// `Passed` when `failures` is empty, `Failed` otherwise.
    pub fn from_failures(failures: Vec<OracleFailure>) -> Self {
        if failures.is_empty() { Self::Passed } else { Self::Failed(failures) }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Violated checks; empty unless `Failed`.
    pub fn failures(&self) -> &[OracleFailure] {
        match self {
            Self::Failed(failures) => failures,
            _ => &[],
        }
    }

    /// Panic with the full report if any check failed. Skips pass.
    #[track_caller]
    pub fn assert_ok(&self) {
        if self.is_failed() {
            panic!("{self}");
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Skipped(notice) => write!(f, "{notice}"),
            Self::Failed(failures) => {
                write!(f, "failed ({} check(s))", failures.len())?;
                for failure in failures {
                    write!(f, "\n  - {failure}")?;
                }
                Ok(())
            }
        }
    }
}
