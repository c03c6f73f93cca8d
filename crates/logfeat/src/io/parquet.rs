//! Parquet tables.
//!
//! Parquet is read into Arrow record batches; each reader batch becomes one
//! table batch.

use std::fs::File;
use std::path::Path;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::LoadError;
use crate::data::Table;

/// Rows per batch when reading Parquet.
const DEFAULT_BATCH_SIZE: usize = 8192;

/// Load a Parquet file into a [`Table`].
pub fn read_parquet_table(path: impl AsRef<Path>) -> Result<Table, LoadError> {
    let file = File::open(path.as_ref())?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(DEFAULT_BATCH_SIZE);
    let schema = builder.schema().clone();
    let reader = builder.build()?;
    let batches: Result<Vec<_>, _> = reader.collect();
    Ok(Table::try_new(schema, batches?)?)
}
