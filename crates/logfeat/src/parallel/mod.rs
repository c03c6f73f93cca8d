//! Partitioning and fork/join dispatch.
//!
//! The input table is split into contiguous runs of whole batches
//! ([`partition_batches`]), each run is processed on its own worker
//! ([`dispatch`]), and outputs are reassembled in partition order. Because
//! every batch is processed independently and reassembly ignores completion
//! order, the result never depends on the number of workers.

mod dispatch;
mod partition;

pub use dispatch::dispatch;
pub use partition::{partition_batches, Partition};
