//! Ordered collection of record batches sharing one schema.

use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::error::{FeatureError, Result};

/// An immutable table: record batches in row order, all with the same schema.
///
/// Row order across the table is the concatenation order of its batches.
/// Batch boundaries are preserved; they are the unit of parallel work.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    /// Create a table, checking that every batch matches `schema`.
    ///
    /// Field names, types and nullability must match; schema metadata is ignored.
    pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        for (i, batch) in batches.iter().enumerate() {
            if batch.schema().fields() != schema.fields() {
                return Err(FeatureError::schema(format!(
                    "batch {i} has fields {:?}, table expects {:?}",
                    field_names(batch.schema_ref()),
                    field_names(&schema),
                )));
            }
        }
        Ok(Self { schema, batches })
    }

    /// Create a table from non-empty batches, taking the schema of the first.
    pub fn from_batches(batches: Vec<RecordBatch>) -> Result<Self> {
        let schema = batches
            .first()
            .map(|b| b.schema())
            .ok_or_else(|| FeatureError::schema("cannot infer a schema from zero batches"))?;
        Self::try_new(schema, batches)
    }

    /// A table with a schema and no batches.
    pub fn empty(schema: SchemaRef) -> Self {
        Self {
            schema,
            batches: Vec::new(),
        }
    }

    #[inline]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    #[inline]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn into_batches(self) -> Vec<RecordBatch> {
        self.batches
    }

    #[inline]
    pub fn num_batches(&self) -> usize {
        self.batches.len()
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Row count of each batch, in table order.
    pub fn row_counts(&self) -> Vec<usize> {
        self.batches.iter().map(RecordBatch::num_rows).collect()
    }

    /// Concatenate all batches into a single batch.
    pub fn concat(&self) -> Result<RecordBatch> {
        Ok(concat_batches(&self.schema, &self.batches)?)
    }
}

fn field_names(schema: &SchemaRef) -> Vec<&str> {
    schema.fields().iter().map(|f| f.name().as_str()).collect()
}
