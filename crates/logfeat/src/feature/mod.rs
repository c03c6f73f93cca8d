//! Row-level feature computation.
//!
//! - [`BoundarySelector`] / [`BoundaryRule`]: pick an endpoint value of a [`CurvePair`]
//! - [`RowStatistic`] / [`PositiveOddCount`]: per-row count over four integer columns
//! - Batch kernels applying either across every row of a record batch

mod batch;
mod boundary;
mod row_stat;

pub(crate) use batch::{count_batch, count_rows, DepthKernel};
pub use batch::{count_output_schema, depth_output_schema, COUNT_COLUMN, DEPTH_METADATA_KEY};
pub use boundary::{BoundaryRule, BoundarySelector, CurvePair};
pub use row_stat::{PositiveOddCount, RowStatistic, ROW_STAT_WIDTH};
