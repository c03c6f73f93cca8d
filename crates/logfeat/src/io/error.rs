//! Error type for table I/O.

use std::io;

use crate::error::FeatureError;

/// Errors that can occur when loading or saving a table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "io-parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}
