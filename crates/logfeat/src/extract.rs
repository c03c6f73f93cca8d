//! High-level extraction entry points.
//!
//! [`FeatureExtractor`] ties validation, batch kernels, partitioning and
//! dispatch together. The free functions [`extract_feature`],
//! [`extract_feature_table`] and [`count_row_feature`] run it with the default
//! configuration.

use std::num::NonZeroUsize;

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::config::ExtractConfig;
use crate::data::Table;
use crate::error::Result;
use crate::feature::{
    count_batch, count_output_schema, count_rows, depth_output_schema, BoundarySelector,
    DepthKernel, PositiveOddCount, RowStatistic,
};
use crate::parallel::{dispatch, partition_batches};
use crate::validate::{resolve_count_columns, resolve_layout, validate_depths};

/// Extract the depth feature of every row of `batch` at the first depth.
///
/// # Errors
///
/// `InvalidArgument` for an empty depth list, `SchemaMismatch` for missing or
/// non-numeric columns.
pub fn extract_feature(batch: &RecordBatch, depths: &[f64]) -> Result<Float64Array> {
    FeatureExtractor::default().extract_batch(batch, depths)
}

/// Extract one feature column per depth across `table` on `n_threads` workers.
///
/// `None` uses all available cores. The result is identical for every
/// thread count.
///
/// # Errors
///
/// `InvalidArgument` for `n_threads <= 0` or an empty depth list,
/// `SchemaMismatch` for missing or non-numeric columns, `WorkerFailure` if
/// any partition fails.
pub fn extract_feature_table(
    table: &Table,
    depths: &[f64],
    n_threads: Option<i64>,
) -> Result<Table> {
    let config = ExtractConfig::default().with_threads(n_threads)?;
    FeatureExtractor::new(config).extract_table(table, depths)
}

/// Count the positive odd values of each row of a four-integer-column batch.
pub fn count_row_feature(batch: &RecordBatch) -> Result<Int64Array> {
    FeatureExtractor::default().count_batch(batch)
}

// =============================================================================
// FeatureExtractor
// =============================================================================

/// Configured extraction engine.
///
/// Holds no state besides its configuration; every call validates its
/// arguments, builds fresh outputs and shares nothing with other calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Float64Array};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use arrow::record_batch::RecordBatch;
/// use logfeat::{ExtractConfig, FeatureExtractor, Table};
///
/// let schema = Arc::new(Schema::new(vec![
///     Field::new("c0", DataType::Float64, false),
///     Field::new("c1", DataType::Float64, false),
/// ]));
/// let batch = RecordBatch::try_new(
///     schema,
///     vec![
///         Arc::new(Float64Array::from(vec![1.0, 2.0])) as ArrayRef,
///         Arc::new(Float64Array::from(vec![3.0, 4.0])) as ArrayRef,
///     ],
/// )
/// .unwrap();
/// let table = Table::from_batches(vec![batch.clone(), batch]).unwrap();
///
/// let extractor = FeatureExtractor::new(ExtractConfig::builder().n_threads(2).build().unwrap());
/// let out = extractor.extract_table(&table, &[0.5, 3.0]).unwrap();
/// assert_eq!(out.num_rows(), 4);
/// assert_eq!(out.num_columns(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: ExtractConfig,
}

impl FeatureExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// One feature value per row of `batch`, at the first depth.
    pub fn extract_batch(&self, batch: &RecordBatch, depths: &[f64]) -> Result<Float64Array> {
        self.extract_batch_with(batch, depths, &self.config.rule)
    }

    /// Like [`extract_batch`](Self::extract_batch) with a custom selector.
    pub fn extract_batch_with<S: BoundarySelector + ?Sized>(
        &self,
        batch: &RecordBatch,
        depths: &[f64],
        selector: &S,
    ) -> Result<Float64Array> {
        validate_depths(depths)?;
        let layout = resolve_layout(batch.schema_ref(), self.config.layout, &self.config.columns)?;
        DepthKernel::new(selector, &layout).evaluate(batch, depths[0])
    }

    /// One feature column per depth for a single batch, on the calling thread.
    pub fn extract_depths(&self, batch: &RecordBatch, depths: &[f64]) -> Result<RecordBatch> {
        validate_depths(depths)?;
        let layout = resolve_layout(batch.schema_ref(), self.config.layout, &self.config.columns)?;
        let schema = depth_output_schema(depths);
        DepthKernel::new(&self.config.rule, &layout).evaluate_depths(batch, depths, &schema)
    }

    /// One feature column per depth across `table`, in parallel.
    ///
    /// The output has one batch per input batch, in input order, so its shape
    /// and contents never depend on the thread count.
    pub fn extract_table(&self, table: &Table, depths: &[f64]) -> Result<Table> {
        tracing::debug!(
            rule = self.config.rule.name(),
            layout = self.config.layout.name(),
            n_depths = depths.len(),
            "extract_table"
        );
        self.extract_table_with(table, depths, &self.config.rule)
    }

    /// Like [`extract_table`](Self::extract_table) with a custom selector.
    pub fn extract_table_with<S: BoundarySelector + ?Sized>(
        &self,
        table: &Table,
        depths: &[f64],
        selector: &S,
    ) -> Result<Table> {
        let n_threads = self.config.resolved_threads()?;
        validate_depths(depths)?;
        let layout = resolve_layout(table.schema(), self.config.layout, &self.config.columns)?;

        let schema = depth_output_schema(depths);
        let kernel = DepthKernel::new(selector, &layout);
        run_table(table, n_threads, schema.clone(), |batch| {
            kernel.evaluate_depths(batch, depths, &schema)
        })
    }

    /// Row statistic of a single batch.
    pub fn count_batch(&self, batch: &RecordBatch) -> Result<Int64Array> {
        self.count_batch_with(batch, &PositiveOddCount)
    }

    /// Like [`count_batch`](Self::count_batch) with a custom statistic.
    pub fn count_batch_with<R: RowStatistic + ?Sized>(
        &self,
        batch: &RecordBatch,
        statistic: &R,
    ) -> Result<Int64Array> {
        let cols = resolve_count_columns(batch.schema_ref())?;
        count_rows(batch, &cols, statistic)
    }

    /// Row statistic across `table`, in parallel.
    pub fn count_table(&self, table: &Table) -> Result<Table> {
        self.count_table_with(table, &PositiveOddCount)
    }

    /// Like [`count_table`](Self::count_table) with a custom statistic.
    pub fn count_table_with<R: RowStatistic + ?Sized>(
        &self,
        table: &Table,
        statistic: &R,
    ) -> Result<Table> {
        let n_threads = self.config.resolved_threads()?;
        let cols = resolve_count_columns(table.schema())?;

        let schema = count_output_schema();
        run_table(table, n_threads, schema.clone(), |batch| {
            count_batch(batch, &cols, statistic, &schema)
        })
    }
}

/// Partition `table`, map every batch through `per_batch` on the pool, and
/// reassemble the outputs in table order.
fn run_table<F>(
    table: &Table,
    n_threads: NonZeroUsize,
    output_schema: SchemaRef,
    per_batch: F,
) -> Result<Table>
where
    F: Fn(&RecordBatch) -> Result<RecordBatch> + Sync + Send,
{
    let partitions = partition_batches(&table.row_counts(), n_threads);
    tracing::debug!(
        n_rows = table.num_rows(),
        n_batches = table.num_batches(),
        n_partitions = partitions.len(),
        "extracting table"
    );

    let outputs = dispatch(&partitions, n_threads, |partition| {
        table.batches()[partition.batches.clone()]
            .iter()
            .map(&per_batch)
            .collect::<Result<Vec<_>>>()
    })?;

    Table::try_new(output_schema, outputs.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, AsArray, Int32Array};
    use arrow::datatypes::{DataType, Field, Float64Type, Schema};

    use super::*;
    use crate::error::FeatureError;
    use crate::feature::CurvePair;

    fn scenario_b() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("p1", DataType::Float64, false),
            Field::new("p2", DataType::Float64, false),
            Field::new("v1", DataType::Float64, false),
            Field::new("v2", DataType::Float64, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![10.0, 50.0, 20.0, 40.0])) as ArrayRef,
                Arc::new(Float64Array::from(vec![15.0, 30.0, 40.0, 50.0])) as ArrayRef,
                Arc::new(Float64Array::from(vec![1.1, 1.2, 1.3, 1.4])) as ArrayRef,
                Arc::new(Float64Array::from(vec![2.1, 2.2, 2.3, 2.4])) as ArrayRef,
            ],
        )
        .unwrap()
    }

    #[test]
    fn single_batch_uses_first_depth() {
        let out = extract_feature(&scenario_b(), &[50.0, 100.0, 200.0]).unwrap();
        assert_eq!(out.values().to_vec(), vec![2.1, 1.2, 2.3, 1.4]);
    }

    #[test]
    fn extract_depths_expands_columns() {
        let out = FeatureExtractor::default()
            .extract_depths(&scenario_b(), &[50.0, 100.0, 200.0])
            .unwrap();
        assert_eq!(out.num_rows(), 4);
        assert_eq!(out.num_columns(), 3);
        let deep = out.column(2).as_primitive::<Float64Type>();
        assert_eq!(deep.values().to_vec(), vec![2.1, 1.2, 2.3, 2.4]);
    }

    #[test]
    fn custom_selector() {
        let always_v2 = |pair: &CurvePair, _d: f64| pair.v2;
        let out = FeatureExtractor::default()
            .extract_batch_with(&scenario_b(), &[0.0], &always_v2)
            .unwrap();
        assert_eq!(out.values().to_vec(), vec![2.1, 2.2, 2.3, 2.4]);
    }

    #[test]
    fn empty_depths_rejected_before_schema_checks() {
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Utf8, true)]));
        let batch = RecordBatch::new_empty(schema);
        let err = extract_feature(&batch, &[]).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidArgument { name: "depths", .. }));
    }

    #[test]
    fn table_thread_count_checked_first() {
        let table = Table::from_batches(vec![scenario_b()]).unwrap();
        for n in [0, -1] {
            let err = extract_feature_table(&table, &[], Some(n)).unwrap_err();
            assert!(matches!(err, FeatureError::InvalidArgument { name: "n_threads", .. }));
        }
    }

    #[test]
    fn count_table_matches_batch_count() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("col1", DataType::Int32, false),
            Field::new("col2", DataType::Int32, false),
            Field::new("col3", DataType::Int32, false),
            Field::new("col4", DataType::Int32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![1, 2, 3, 4])) as ArrayRef,
                Arc::new(Int32Array::from(vec![-1, 5, -7, 8])) as ArrayRef,
                Arc::new(Int32Array::from(vec![9, 0, 11, -12])) as ArrayRef,
                Arc::new(Int32Array::from(vec![13, 15, 17, 19])) as ArrayRef,
            ],
        )
        .unwrap();
        let single = count_row_feature(&batch).unwrap();
        assert_eq!(single.values().to_vec(), vec![3, 2, 3, 1]);

        let table = Table::from_batches(vec![batch.clone(), batch.clone(), batch]).unwrap();
        let config = ExtractConfig::builder().n_threads(2).build().unwrap();
        let out = FeatureExtractor::new(config)
            .count_table(&table)
            .unwrap()
            .concat()
            .unwrap();
        let counts = out.column(0).as_primitive::<arrow::datatypes::Int64Type>();
        assert_eq!(counts.values().to_vec(), vec![3, 2, 3, 1, 3, 2, 3, 1, 3, 2, 3, 1]);
    }
}
