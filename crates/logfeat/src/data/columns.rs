//! Typed column access with numeric widening.

use arrow::array::{Array, AsArray, Float64Array, Int64Array};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;

use crate::error::{FeatureError, Result};

/// Read column `idx` of `batch` as Float64, widening any numeric type.
pub(crate) fn float64_column(batch: &RecordBatch, idx: usize) -> Result<Float64Array> {
    let col = batch.column(idx);
    if let Some(arr) = col.as_primitive_opt::<Float64Type>() {
        return Ok(arr.clone());
    }
    if !col.data_type().is_numeric() {
        return Err(unsupported(batch, idx, "numeric"));
    }
    let widened = cast(col, &DataType::Float64)?;
    Ok(widened.as_primitive::<Float64Type>().clone())
}

/// Read column `idx` of `batch` as Int64, widening any integer type.
///
/// Values that do not fit in an `i64` (large `UInt64`) are an error, never
/// silently nulled.
pub(crate) fn int64_column(batch: &RecordBatch, idx: usize) -> Result<Int64Array> {
    let col = batch.column(idx);
    if let Some(arr) = col.as_primitive_opt::<Int64Type>() {
        return Ok(arr.clone());
    }
    if !col.data_type().is_integer() {
        return Err(unsupported(batch, idx, "integer"));
    }
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    let widened = cast_with_options(col, &DataType::Int64, &options)?;
    Ok(widened.as_primitive::<Int64Type>().clone())
}

/// Value at `row`, or `None` if the cell is null.
#[inline]
pub(crate) fn value_at<T>(arr: &arrow::array::PrimitiveArray<T>, row: usize) -> Option<T::Native>
where
    T: arrow::datatypes::ArrowPrimitiveType,
{
    if arr.is_null(row) {
        None
    } else {
        Some(arr.value(row))
    }
}

fn unsupported(batch: &RecordBatch, idx: usize, expected: &str) -> FeatureError {
    let field = batch.schema_ref().field(idx).clone();
    FeatureError::schema(format!(
        "column '{}' must be {expected}, got {}",
        field.name(),
        field.data_type()
    ))
}
