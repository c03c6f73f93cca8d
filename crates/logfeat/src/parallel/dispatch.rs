//! Fork/join dispatch of partitions onto a bounded worker pool.
//!
//! Each partition is handed to its own task and produces an owned result.
//! Results are gathered by partition index, never by completion order, and a
//! failure anywhere is reported only after every worker has finished.

use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::partition::Partition;
use crate::error::{FeatureError, PartitionFailure, Result};
use crate::utils::run_with_threads;

/// Run `work` once per partition on `n_threads` workers.
///
/// Returns one output per partition, in partition order. If any partition
/// returns an error or panics, all other partitions still run to completion
/// and a single [`FeatureError::WorkerFailure`] listing every failed partition
/// is returned instead; successful outputs are dropped.
pub fn dispatch<T, F>(partitions: &[Partition], n_threads: NonZeroUsize, work: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Partition) -> Result<T> + Sync + Send,
{
    tracing::debug!(
        n_partitions = partitions.len(),
        n_threads = n_threads.get(),
        "dispatching partitions"
    );

    let outcomes: Vec<std::result::Result<T, String>> = run_with_threads(n_threads, |par| {
        par.maybe_par_map(partitions, |partition| run_partition(partition, &work))
    })?;

    let total = outcomes.len();
    let mut outputs = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for (partition, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(output) => outputs.push(output),
            Err(message) => failures.push(PartitionFailure { partition, message }),
        }
    }

    if failures.is_empty() {
        Ok(outputs)
    } else {
        tracing::warn!(failed = failures.len(), total, "partitions failed");
        Err(FeatureError::WorkerFailure { failures, total })
    }
}

fn run_partition<T, F>(partition: &Partition, work: &F) -> std::result::Result<T, String>
where
    F: Fn(&Partition) -> Result<T>,
{
    match catch_unwind(AssertUnwindSafe(|| work(partition))) {
        Ok(Ok(output)) => {
            tracing::debug!(
                partition = partition.index,
                n_batches = partition.n_batches(),
                n_rows = partition.n_rows,
                "partition done"
            );
            Ok(output)
        }
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(format!("worker panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
