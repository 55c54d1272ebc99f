//! Rayon-backed reduction pool.
//!
//! Wraps a [`rayon::ThreadPool`] sized from [`OracleConfig`]. Every reduction is
//! a synchronous fork/join: the calling thread blocks until all partial results
//! are merged.

use crate::combiner::Combiner;
use oracle_common::{OracleConfig, OracleError, Result};
use rayon::prelude::*;
use std::ops::Range;

/// Thread pool used to evaluate reductions.
pub struct ReductionPool {
    /// `None` means rayon's global pool.
    pool: Option<rayon::ThreadPool>,
    num_threads: usize,
    min_parallel_len: usize,
}

impl ReductionPool {
    /// Build a dedicated pool from the given configuration.
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let prefix = config.thread_name_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads.max(1))
            .thread_name(move |idx| format!("{prefix}-{idx}"))
            .build()
            .map_err(|e| OracleError::ThreadPool(e.to_string()))?;

        tracing::debug!(
            num_threads = config.num_threads,
            min_parallel_len = config.min_parallel_len,
            "built reduction pool"
        );

        Ok(Self {
            pool: Some(pool),
            num_threads: config.num_threads.max(1),
            min_parallel_len: config.min_parallel_len,
        })
    }

    /// A pool with `num_threads` workers that parallelises every non-trivial range.
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        Self::new(&OracleConfig { num_threads, min_parallel_len: 2, ..OracleConfig::default() })
    }

    /// Run reductions on rayon's global pool rather than a dedicated one.
    pub fn on_rayon_global(config: &OracleConfig) -> Self {
        Self {
            pool: None,
            num_threads: rayon::current_num_threads(),
            min_parallel_len: config.min_parallel_len,
        }
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn min_parallel_len(&self) -> usize {
        self.min_parallel_len
    }

    /// Map-reduce over `range`: apply `f` to each index, then fold results
    /// together with `combine`, starting from `identity`.
    ///
    /// `combine` must be associative and commutative with `identity` as its
    /// neutral element; the result is then independent of how the range is
    /// split. Ranges shorter than `min_parallel_len` are folded in order on the
    /// calling thread.
    pub fn parallel_reduce<T, F, C>(&self, range: Range<usize>, identity: T, f: F, combine: C) -> T
    where
        T: Send + Sync + Clone,
        F: Fn(usize) -> T + Send + Sync,
        C: Fn(T, T) -> T + Send + Sync,
    {
        let len = range.len();
        if len < self.min_parallel_len.max(2) {
            return range.map(&f).fold(identity, &combine);
        }

        tracing::trace!(len, threads = self.num_threads, "parallel reduction");
        self.install(|| range.into_par_iter().map(&f).reduce(|| identity.clone(), &combine))
    }

    /// [`ReductionPool::parallel_reduce`] with a [`Combiner`] supplying the
    /// identity and merge operator.
    pub fn reduce<C, F>(&self, range: Range<usize>, combiner: &C, f: F) -> C::Output
    where
        C: Combiner,
        F: Fn(usize) -> C::Output + Send + Sync,
    {
        self.parallel_reduce(range, combiner.identity(), f, |a, b| combiner.combine(a, b))
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl std::fmt::Debug for ReductionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReductionPool")
            .field("num_threads", &self.num_threads)
            .field("min_parallel_len", &self.min_parallel_len)
            .field("dedicated", &self.pool.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::{ArgMax, LogicalOr, Max};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_pool(threads: usize) -> ReductionPool {
        ReductionPool::with_threads(threads).expect("failed to build test pool")
    }

    #[test]
    fn test_pool_respects_thread_count() {
        let pool = test_pool(3);
        assert_eq!(pool.num_threads(), 3);
        assert_eq!(pool.min_parallel_len(), 2);
    }

    #[test]
    fn test_pool_debug_impl() {
        let dbg = format!("{:?}", test_pool(2));
        assert!(dbg.contains("ReductionPool"));
        assert!(dbg.contains("num_threads"));
    }

    #[test]
    fn test_parallel_reduce_sum() {
        let pool = test_pool(4);
        let sum = pool.parallel_reduce(0..1000, 0usize, |i| i, |a, b| a + b);
        assert_eq!(sum, 999 * 1000 / 2);
    }

    #[test]
    fn test_parallel_reduce_empty_range_returns_identity() {
        let pool = test_pool(2);
        assert_eq!(pool.parallel_reduce(0..0, 7usize, |i| i, |a, b| a + b), 7);
        assert_eq!(pool.reduce(0..0, &Max::<f64>::new(), |_| 1.0), 0.0);
        assert!(!pool.reduce(0..0, &LogicalOr, |_| true));
    }

    #[test]
    fn test_parallel_reduce_visits_every_index_once() {
        let pool = test_pool(4);
        let visits = AtomicUsize::new(0);
        let count = pool.parallel_reduce(
            0..517,
            0usize,
            |_| {
                visits.fetch_add(1, Ordering::Relaxed);
                1
            },
            |a, b| a + b,
        );
        assert_eq!(count, 517);
        assert_eq!(visits.load(Ordering::Relaxed), 517);
    }

    #[test]
    fn test_sequential_and_parallel_paths_agree() {
        let data: Vec<f64> = (0..300).map(|i| ((i * 37) % 101) as f64 - 50.0).collect();
        let sequential = ReductionPool::new(&OracleConfig {
            num_threads: 1,
            min_parallel_len: usize::MAX,
            ..OracleConfig::default()
        })
        .unwrap();
        let parallel = test_pool(4);

        let max = Max::<f64>::new();
        let a = sequential.reduce(0..data.len(), &max, |i| data[i].abs());
        let b = parallel.reduce(0..data.len(), &max, |i| data[i].abs());
        assert_eq!(a, b);
        assert_eq!(a, 50.0);

        let am = ArgMax::<f64>::new();
        let ia = sequential.reduce(0..data.len(), &am, |i| Some((i, data[i].abs())));
        let ib = parallel.reduce(0..data.len(), &am, |i| Some((i, data[i].abs())));
        assert_eq!(ia, ib);
    }

    #[test]
    fn test_logical_or_finds_single_difference() {
        let pool = test_pool(4);
        let hit = pool.reduce(0..10_000, &LogicalOr, |i| i == 9_876);
        assert!(hit);
        let miss = pool.reduce(0..10_000, &LogicalOr, |i| i == 10_000);
        assert!(!miss);
    }

    #[test]
    fn test_rayon_global_fallback_reduces() {
        let pool = ReductionPool::on_rayon_global(&OracleConfig {
            min_parallel_len: 2,
            ..OracleConfig::default()
        });
        assert!(pool.num_threads() >= 1);
        let sum = pool.parallel_reduce(0..100, 0u64, |i| i as u64, |a, b| a + b);
        assert_eq!(sum, 4950);
    }
}
