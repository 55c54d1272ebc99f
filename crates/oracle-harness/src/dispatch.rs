//! Records which kernel entry points a test run touched.
//!
//! Skipped cases still report their kernel here so coverage accounting sees
//! every kernel the suite was meant to exercise.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Receiver for "kernel was called" markers.
pub trait DispatchTracker: Send + Sync {
    fn signal_called(&self, kernel: &str);
}

/// Thread-safe set of kernel names that were signalled.
#[derive(Debug, Default)]
pub struct DispatchRegistry {
    called: Mutex<BTreeSet<String>>,
}

static GLOBAL_REGISTRY: OnceLock<DispatchRegistry> = OnceLock::new();

/// Process-wide registry used by [`crate::run_checked`].
pub fn global_registry() -> &'static DispatchRegistry {
    GLOBAL_REGISTRY.get_or_init(DispatchRegistry::default)
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking test may poison the lock; the set itself stays valid.
    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        match self.called.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn was_called(&self, kernel: &str) -> bool {
        self.lock().contains(kernel)
    }

    /// Signalled kernel names in sorted order.
    pub fn called_kernels(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl DispatchTracker for DispatchRegistry {
    fn signal_called(&self, kernel: &str) {
        if self.lock().insert(kernel.to_string()) {
            tracing::trace!(kernel, "kernel marked as called");
        }
    }
}
