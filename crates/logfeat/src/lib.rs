//! logfeat: columnar well-log feature extraction on Arrow record batches.
//!
//! Evaluates a boundary-selection rule for every row of a table of curve
//! samples, one output column per requested depth, and splits the work across
//! a bounded pool of workers without the result ever depending on the worker
//! count.
//!
//! # Key Types
//!
//! - [`FeatureExtractor`] / [`ExtractConfig`] - Configured extraction engine
//! - [`Table`] - Ordered record batches sharing one schema
//! - [`BoundaryRule`] / [`BoundarySelector`] - Per-row selection rule
//! - [`RowStatistic`] / [`PositiveOddCount`] - Per-row integer statistic
//! - [`FeatureError`] - Error type for every fallible operation
//!
//! # Parallel extraction
//!
//! Tables are split into contiguous runs of whole batches (see [`parallel`]),
//! each run is handled on its own worker, and outputs are stitched back
//! together in table order.
//!
//! # Feature gates
//!
//! - `io-parquet`: Parquet loading in [`io`]

pub mod config;
pub mod data;
mod error;
pub mod extract;
pub mod feature;
pub mod io;
pub mod parallel;
pub mod testing;
pub mod utils;
pub mod validate;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Errors
pub use error::{FeatureError, PartitionFailure, Result};

// Configuration and entry points
pub use config::ExtractConfig;
pub use extract::{count_row_feature, extract_feature, extract_feature_table, FeatureExtractor};

// Data types
pub use data::{CurveLayout, CurvePairColumns, Table};

// Row rules
pub use feature::{BoundaryRule, BoundarySelector, CurvePair, PositiveOddCount, RowStatistic};

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
