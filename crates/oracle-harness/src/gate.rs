//! Capability gate: decide whether a test case can run for an element kind.
//!
//! Real kinds always run. Complex kinds run only when the in-memory alignment
//! of `num_complex::Complex<R>` matches the alignment the interoperating array
//! substrate uses for complex values; otherwise buffers exchanged with the
//! substrate would not be layout compatible.

use crate::dispatch::{DispatchTracker, global_registry};
use crate::outcome::{SkipNotice, TestId, TestOutcome};
use oracle_common::{Complex32, Complex64, Element, NumericKind, OracleConfig};
use std::fmt;
use std::mem::align_of;

/// Memory layout conventions of the array substrate kernels exchange data with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstrateLayout {
    /// Complex values aligned to twice their component size.
    pub complex_align: bool,
}

impl SubstrateLayout {
    /// Complex values aligned like their components.
    pub const fn natural() -> Self {
        Self { complex_align: false }
    }

    /// Complex values aligned to `2 * size_of::<R>()`.
    pub const fn over_aligned() -> Self {
        Self { complex_align: true }
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        Self { complex_align: config.complex_align }
    }

    /// Alignment in bytes the substrate uses for complex values of `kind`.
    /// `None` for real kinds.
    pub fn complex_alignment(&self, kind: NumericKind) -> Option<usize> {
        if !kind.is_complex() {
            return None;
        }
        let component = kind.component_size();
        Some(if self.complex_align { 2 * component } else { component })
    }
}

impl Default for SubstrateLayout {
    fn default() -> Self {
        Self::natural()
    }
}

/// Alignment of this crate's complex representation for `kind`.
fn native_complex_alignment(kind: NumericKind) -> Option<usize> {
    match kind {
        NumericKind::ComplexF32 => Some(align_of::<Complex32>()),
        NumericKind::ComplexF64 => Some(align_of::<Complex64>()),
        NumericKind::F32 | NumericKind::F64 => None,
    }
}

/// Outcome of a capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityCheck {
    Compatible,
    ComplexAlignmentMismatch { kind: NumericKind, native: usize, substrate: usize },
}

impl CapabilityCheck {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible)
    }
}

impl fmt::Display for CapabilityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compatible => f.write_str("compatible"),
            Self::ComplexAlignmentMismatch { kind, native, substrate } => write!(
                f,
                "{kind} is {native}-byte aligned but the array substrate aligns complex values to {substrate} bytes"
            ),
        }
    }
}

/// Runtime capability checks against a [`SubstrateLayout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilityGate {
    layout: SubstrateLayout,
}

impl CapabilityGate {
    pub fn new(layout: SubstrateLayout) -> Self {
        Self { layout }
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new(SubstrateLayout::from_config(config))
    }

    pub fn layout(&self) -> SubstrateLayout {
        self.layout
    }

    pub fn check(&self, kind: NumericKind) -> CapabilityCheck {
        match (native_complex_alignment(kind), self.layout.complex_alignment(kind)) {
            (Some(native), Some(substrate)) if native != substrate => {
                CapabilityCheck::ComplexAlignmentMismatch { kind, native, substrate }
            }
            _ => CapabilityCheck::Compatible,
        }
    }

    pub fn runnable(&self, kind: NumericKind) -> bool {
        self.check(kind).is_compatible()
    }
}

/// Run `body` if `kind` passes `gate`, otherwise skip it.
///
/// A skipped case is logged at WARN with the full test id, and its kernel is
/// still reported to `tracker` so kernel coverage stays complete.
#[must_use]
pub fn run_guarded<F>(
    gate: &CapabilityGate,
    tracker: &dyn DispatchTracker,
    kind: NumericKind,
    id: &TestId,
    body: F,
) -> TestOutcome
where
    F: FnOnce() -> TestOutcome,
{
    match gate.check(kind) {
        CapabilityCheck::Compatible => body(),
        check => {
            tracing::warn!(
                test = %id,
                prefix = %id.prefix,
                kernel = %id.kernel,
                postfix = %id.postfix,
                type_spec = %id.type_spec,
                reason = %check,
                "skipping test case: element kind not supported by the array substrate"
            );
            tracker.signal_called(&id.kernel);
            TestOutcome::Skipped(SkipNotice { test: id.clone(), reason: check.to_string() })
        }
    }
}

/// [`run_guarded`] for element type `T`, using the process-wide configuration
/// and dispatch registry.
#[must_use]
pub fn run_checked<T, F>(id: &TestId, body: F) -> TestOutcome
where
    T: Element,
    F: FnOnce() -> TestOutcome,
{
    let gate = CapabilityGate::from_config(OracleConfig::global());
    run_guarded(&gate, global_registry(), T::KIND, id, body)
}
