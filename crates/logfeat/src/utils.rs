//! Parallelism configuration and thread pool setup.

use std::num::NonZeroUsize;

use rayon::prelude::*;

use crate::error::Result;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// When `true`, components may use `rayon` parallel iterators on the pool
/// installed by [`run_with_threads`]. When `false`, they iterate on the
/// calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// One thread is sequential, anything more is parallel.
    #[inline]
    pub fn from_threads(n_threads: NonZeroUsize) -> Self {
        if n_threads.get() == 1 {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map every item, preserving input order in the output.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        <I as IntoParallelIterator>::Iter: IndexedParallelIterator,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure on a dedicated pool of exactly `n_threads` workers.
///
/// A single thread runs the closure inline with [`Parallelism::Sequential`].
/// The pool is created for this call only and torn down when it returns, so
/// concurrent calls with different thread counts never interfere.
pub fn run_with_threads<T: Send>(
    n_threads: NonZeroUsize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T> {
    match Parallelism::from_threads(n_threads) {
        Parallelism::Sequential => Ok(f(Parallelism::Sequential)),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads.get())
                .thread_name(|i| format!("logfeat-worker-{i}"))
                .build()?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threads(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_parallelism_from_threads() {
        assert!(!Parallelism::from_threads(threads(1)).is_parallel());
        assert!(Parallelism::from_threads(threads(2)).is_parallel());
        assert!(Parallelism::from_threads(threads(8)).is_parallel());
    }

    #[test]
    fn test_run_with_threads_sequential() {
        let result = run_with_threads(threads(1), |p| (p, 42)).unwrap();
        assert_eq!(result, (Parallelism::Sequential, 42));
    }

    #[test]
    fn test_run_with_threads_explicit() {
        let result = run_with_threads(threads(3), |_| rayon::current_num_threads()).unwrap();
        assert_eq!(result, 3);
    }

    #[test]
    fn test_maybe_par_map_preserves_order() {
        let seq: Vec<_> = Parallelism::Sequential.maybe_par_map(0..100usize, |i| i * 2);
        let par: Vec<_> = run_with_threads(threads(4), |p| p.maybe_par_map(0..100usize, |i| i * 2))
            .unwrap();
        assert_eq!(seq, (0..100).map(|i| i * 2).collect::<Vec<_>>());
        assert_eq!(par, seq);
    }
}
