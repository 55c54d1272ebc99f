//! Parallel map-reduce over index ranges.
//!
//! The comparators express every whole-container metric as a reduction over
//! `[0, n)`: a per-index function produces a partial value and an associative,
//! commutative [`Combiner`] folds the partials together. Because the combiner
//! is a commutative monoid, the result is the same for any partition of the
//! range across workers and any merge order.
//!
//! Work runs on a [`ReductionPool`] (a configured [`rayon::ThreadPool`]);
//! [`global`] returns the process-wide pool built from
//! [`OracleConfig::global`](oracle_common::OracleConfig::global).

pub mod combiner;
pub mod pool;

pub use combiner::{ArgMax, Combiner, LogicalOr, Max};
pub use pool::ReductionPool;

use oracle_common::OracleConfig;
use std::sync::OnceLock;

static GLOBAL_POOL: OnceLock<ReductionPool> = OnceLock::new();

/// The process-wide reduction pool.
///
/// If a dedicated pool cannot be built, reductions run on rayon's global pool
/// instead; results are unaffected.
pub fn global() -> &'static ReductionPool {
    GLOBAL_POOL.get_or_init(|| {
        let config = OracleConfig::global();
        ReductionPool::new(config).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to rayon's global pool for reductions");
            ReductionPool::on_rayon_global(config)
        })
    })
}
