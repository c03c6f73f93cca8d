//! Per-batch evaluation of depth features and row statistics.
//!
//! A batch is the unit of work: input columns are read (and widened) once per
//! batch, then every target depth is evaluated over every row. Outputs are
//! freshly allocated arrays; nothing is shared with the input batch.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use super::boundary::{BoundarySelector, CurvePair};
use super::row_stat::{RowStatistic, ROW_STAT_WIDTH};
use crate::data::columns::{float64_column, int64_column, value_at};
use crate::data::{ordinal_bracket, ResolvedLayout};
use crate::error::Result;

/// Output column name of the row statistic.
pub const COUNT_COLUMN: &str = "count";
/// Field metadata key holding the target depth of an output column.
pub const DEPTH_METADATA_KEY: &str = "depth";

/// Output schema of a multi-depth extraction: one nullable Float64 column per
/// depth, named `depth_{k}`, with the depth value in the field metadata.
pub fn depth_output_schema(depths: &[f64]) -> SchemaRef {
    let fields: Vec<Field> = depths
        .iter()
        .enumerate()
        .map(|(k, d)| {
            Field::new(format!("depth_{k}"), DataType::Float64, true).with_metadata(HashMap::from(
                [(DEPTH_METADATA_KEY.to_string(), d.to_string())],
            ))
        })
        .collect();
    Arc::new(Schema::new(fields))
}

/// Output schema of the row statistic.
pub fn count_output_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![Field::new(COUNT_COLUMN, DataType::Int64, false)]))
}

// =============================================================================
// Depth Features
// =============================================================================

/// Curve inputs of one batch, widened to Float64.
enum CurveInputs {
    Pair([Float64Array; 4]),
    Ordinal(Vec<Float64Array>),
}

/// Evaluates a boundary selector over the rows of a batch.
pub(crate) struct DepthKernel<'a, S: BoundarySelector + ?Sized> {
    selector: &'a S,
    layout: &'a ResolvedLayout,
}

impl<'a, S: BoundarySelector + ?Sized> DepthKernel<'a, S> {
    pub(crate) fn new(selector: &'a S, layout: &'a ResolvedLayout) -> Self {
        Self { selector, layout }
    }

    /// One value per row for a single depth.
    pub(crate) fn evaluate(&self, batch: &RecordBatch, depth: f64) -> Result<Float64Array> {
        let inputs = self.load(batch)?;
        Ok(self.evaluate_loaded(&inputs, batch.num_rows(), depth))
    }

    /// One column per depth, shaped by `schema` (see [`depth_output_schema`]).
    pub(crate) fn evaluate_depths(
        &self,
        batch: &RecordBatch,
        depths: &[f64],
        schema: &SchemaRef,
    ) -> Result<RecordBatch> {
        let inputs = self.load(batch)?;
        let n_rows = batch.num_rows();
        let columns: Vec<ArrayRef> = depths
            .iter()
            .map(|&d| Arc::new(self.evaluate_loaded(&inputs, n_rows, d)) as ArrayRef)
            .collect();
        Ok(RecordBatch::try_new(schema.clone(), columns)?)
    }

    fn load(&self, batch: &RecordBatch) -> Result<CurveInputs> {
        match self.layout {
            ResolvedLayout::Pair([p1, p2, v1, v2]) => Ok(CurveInputs::Pair([
                float64_column(batch, *p1)?,
                float64_column(batch, *p2)?,
                float64_column(batch, *v1)?,
                float64_column(batch, *v2)?,
            ])),
            ResolvedLayout::Ordinal(cols) => cols
                .iter()
                .map(|&i| float64_column(batch, i))
                .collect::<Result<Vec<_>>>()
                .map(CurveInputs::Ordinal),
        }
    }

    fn evaluate_loaded(&self, inputs: &CurveInputs, n_rows: usize, depth: f64) -> Float64Array {
        match inputs {
            CurveInputs::Pair([p1, p2, v1, v2]) => (0..n_rows)
                .map(|row| {
                    let pair = CurvePair::new(
                        value_at(p1, row)?,
                        value_at(p2, row)?,
                        value_at(v1, row)?,
                        value_at(v2, row)?,
                    );
                    Some(self.selector.select(&pair, depth))
                })
                .collect(),
            CurveInputs::Ordinal(cols) => {
                let (lo, hi) = ordinal_bracket(cols.len(), depth);
                let (lo_col, hi_col) = (&cols[lo], &cols[hi]);
                (0..n_rows)
                    .map(|row| {
                        let pair = CurvePair::new(
                            lo as f64,
                            hi as f64,
                            value_at(lo_col, row)?,
                            value_at(hi_col, row)?,
                        );
                        Some(self.selector.select(&pair, depth))
                    })
                    .collect()
            }
        }
    }
}

// =============================================================================
// Row Statistic
// =============================================================================

/// One count per row of `batch`, from the four columns at `cols`.
pub(crate) fn count_rows<R: RowStatistic + ?Sized>(
    batch: &RecordBatch,
    cols: &[usize; ROW_STAT_WIDTH],
    statistic: &R,
) -> Result<Int64Array> {
    let arrays = [
        int64_column(batch, cols[0])?,
        int64_column(batch, cols[1])?,
        int64_column(batch, cols[2])?,
        int64_column(batch, cols[3])?,
    ];
    let counts: Vec<i64> = (0..batch.num_rows())
        .map(|row| {
            let values = [
                value_at(&arrays[0], row),
                value_at(&arrays[1], row),
                value_at(&arrays[2], row),
                value_at(&arrays[3], row),
            ];
            statistic.count(&values)
        })
        .collect();
    Ok(Int64Array::from(counts))
}

/// Row statistic of `batch` wrapped in a single-column output batch.
pub(crate) fn count_batch<R: RowStatistic + ?Sized>(
    batch: &RecordBatch,
    cols: &[usize; ROW_STAT_WIDTH],
    statistic: &R,
    schema: &SchemaRef,
) -> Result<RecordBatch> {
    let counts = count_rows(batch, cols, statistic)?;
    Ok(RecordBatch::try_new(schema.clone(), vec![Arc::new(counts) as ArrayRef])?)
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, AsArray, Float32Array, Int64Array};
    use arrow::datatypes::Float64Type;

    use super::*;
    use crate::feature::{BoundaryRule, PositiveOddCount};

    fn pair_batch(rows: &[(f64, f64, f64, f64)]) -> RecordBatch {
        let col = |f: fn(&(f64, f64, f64, f64)) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
        };
        let schema = Arc::new(Schema::new(vec![
            Field::new("p1", DataType::Float64, true),
            Field::new("p2", DataType::Float64, true),
            Field::new("v1", DataType::Float64, true),
            Field::new("v2", DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![col(|r| r.0), col(|r| r.1), col(|r| r.2), col(|r| r.3)],
        )
        .unwrap()
    }

    #[test]
    fn pair_layout_one_value_per_row() {
        let batch = pair_batch(&[
            (10.0, 15.0, 1.1, 2.1),
            (50.0, 30.0, 1.2, 2.2),
            (20.0, 40.0, 1.3, 2.3),
            (40.0, 50.0, 1.4, 2.4),
        ]);
        let layout = ResolvedLayout::Pair([0, 1, 2, 3]);
        let kernel = DepthKernel::new(&BoundaryRule::DeeperPassed, &layout);
        let out = kernel.evaluate(&batch, 50.0).unwrap();
        assert_eq!(out.values().to_vec(), vec![2.1, 1.2, 2.3, 1.4]);
    }

    #[test]
    fn null_inputs_give_null_outputs() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("p1", DataType::Float64, true),
            Field::new("p2", DataType::Float64, true),
            Field::new("v1", DataType::Float64, true),
            Field::new("v2", DataType::Float32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![Some(0.0), None])) as ArrayRef,
                Arc::new(Float64Array::from(vec![1.0, 1.0])) as ArrayRef,
                Arc::new(Float64Array::from(vec![5.0, 5.0])) as ArrayRef,
                Arc::new(Float32Array::from(vec![6.0, 6.0])) as ArrayRef,
            ],
        )
        .unwrap();
        let layout = ResolvedLayout::Pair([0, 1, 2, 3]);
        let out = DepthKernel::new(&BoundaryRule::DeeperPassed, &layout)
            .evaluate(&batch, 2.0)
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.value(0), 6.0);
        assert!(out.is_null(1));
    }

    #[test]
    fn ordinal_layout_brackets_by_column_position() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("c0", DataType::Float64, true),
            Field::new("c1", DataType::Float64, true),
            Field::new("c2", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![10.0, 20.0])) as ArrayRef,
                Arc::new(Float64Array::from(vec![11.0, 21.0])) as ArrayRef,
                Arc::new(Float64Array::from(vec![12.0, 22.0])) as ArrayRef,
            ],
        )
        .unwrap();
        let layout = ResolvedLayout::Ordinal(vec![0, 1, 2]);
        let kernel = DepthKernel::new(&BoundaryRule::DeeperPassed, &layout);
        let depths = [0.5, 1.5, 2.0, 9.0];
        let schema = depth_output_schema(&depths);
        let out = kernel.evaluate_depths(&batch, &depths, &schema).unwrap();

        assert_eq!(out.num_rows(), 2);
        assert_eq!(out.num_columns(), 4);
        let col = |k: usize| out.column(k).as_primitive::<Float64Type>().values().to_vec();
        // Inside a bracket the shallower sample wins.
        assert_eq!(col(0), vec![10.0, 20.0]);
        assert_eq!(col(1), vec![11.0, 21.0]);
        // Exactly on the deepest sample: not yet beyond it.
        assert_eq!(col(2), vec![11.0, 21.0]);
        // Past the deepest sample.
        assert_eq!(col(3), vec![12.0, 22.0]);
    }

    #[test]
    fn output_schema_carries_depths() {
        let schema = depth_output_schema(&[0.1, 5.0]);
        assert_eq!(schema.field(0).name(), "depth_0");
        assert_eq!(schema.field(1).name(), "depth_1");
        assert_eq!(
            schema.field(1).metadata().get(DEPTH_METADATA_KEY).map(String::as_str),
            Some("5")
        );
    }

    #[test]
    fn counts_positive_odd_values() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("col1", DataType::Int64, true),
            Field::new("col2", DataType::Int64, true),
            Field::new("col3", DataType::Int64, true),
            Field::new("col4", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef,
                Arc::new(Int64Array::from(vec![-1, 5, -7, 8])) as ArrayRef,
                Arc::new(Int64Array::from(vec![9, 0, 11, -12])) as ArrayRef,
                Arc::new(Int64Array::from(vec![13, 15, 17, 19])) as ArrayRef,
            ],
        )
        .unwrap();
        let counts = count_rows(&batch, &[0, 1, 2, 3], &PositiveOddCount).unwrap();
        assert_eq!(counts.values().to_vec(), vec![3, 2, 3, 1]);
    }
}
