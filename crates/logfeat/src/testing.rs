//! Deterministic synthetic tables for tests and benchmarks.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use rand::prelude::*;

use crate::data::Table;

/// Ordinal curve table: `num_batches` batches of `rows_per_batch` rows and
/// `num_cols` Float64 columns named `col_{j}`.
///
/// Every batch and column draws from its own seed, scaled by
/// `(batch + 1) * (col + 1)`, so batches differ from each other.
pub fn ordinal_curve_table(
    num_batches: usize,
    rows_per_batch: usize,
    num_cols: usize,
    seed: u64,
) -> Table {
    let schema: SchemaRef = Arc::new(Schema::new(
        (0..num_cols)
            .map(|j| Field::new(format!("col_{j}"), DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));

    let batches = (0..num_batches)
        .map(|b| {
            let columns: Vec<ArrayRef> = (0..num_cols)
                .map(|j| {
                    let scale = ((b + 1) * (j + 1)) as f64;
                    let mut rng = StdRng::seed_from_u64(seed ^ (b * num_cols + j) as u64);
                    let values: Vec<f64> =
                        (0..rows_per_batch).map(|_| rng.r#gen::<f64>() * scale).collect();
                    Arc::new(Float64Array::from(values)) as ArrayRef
                })
                .collect();
            RecordBatch::try_new(schema.clone(), columns)
                .expect("generated columns match the generated schema")
        })
        .collect();

    Table::try_new(schema, batches).expect("generated batches share one schema")
}

/// Curve pair table with `p1`, `p2`, `v1`, `v2` columns and uneven batch sizes.
///
/// Positions are uniform in `[0, max_position)`, values in `[0, 1)`.
pub fn curve_pair_table(batch_rows: &[usize], max_position: f64, seed: u64) -> Table {
    let schema: SchemaRef = Arc::new(Schema::new(
        ["p1", "p2", "v1", "v2"]
            .iter()
            .map(|n| Field::new(*n, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));
    let mut rng = StdRng::seed_from_u64(seed);

    let batches = batch_rows
        .iter()
        .map(|&rows| {
            let mut column = |scale: f64| -> ArrayRef {
                let values: Vec<f64> = (0..rows).map(|_| rng.r#gen::<f64>() * scale).collect();
                Arc::new(Float64Array::from(values))
            };
            let columns = vec![
                column(max_position),
                column(max_position),
                column(1.0),
                column(1.0),
            ];
            RecordBatch::try_new(schema.clone(), columns)
                .expect("generated columns match the generated schema")
        })
        .collect();

    Table::try_new(schema, batches).expect("generated batches share one schema")
}

/// Four Int64 columns `col1`..`col4` with values in `[-50, 50)`, for the row
/// statistic.
pub fn integer_count_table(num_batches: usize, rows_per_batch: usize, seed: u64) -> Table {
    let schema: SchemaRef = Arc::new(Schema::new(
        (1..=4)
            .map(|j| Field::new(format!("col{j}"), DataType::Int64, false))
            .collect::<Vec<_>>(),
    ));
    let mut rng = StdRng::seed_from_u64(seed);

    let batches = (0..num_batches)
        .map(|_| {
            let columns: Vec<ArrayRef> = (0..4)
                .map(|_| {
                    let values: Vec<i64> =
                        (0..rows_per_batch).map(|_| rng.gen_range(-50..50)).collect();
                    Arc::new(Int64Array::from(values)) as ArrayRef
                })
                .collect();
            RecordBatch::try_new(schema.clone(), columns)
                .expect("generated columns match the generated schema")
        })
        .collect();

    Table::try_new(schema, batches).expect("generated batches share one schema")
}
