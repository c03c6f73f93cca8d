//! Argument and schema validation.
//!
//! Every check here runs before any worker is spawned. Data values are never
//! range-checked: NaN and infinities pass through to the selectors.

use std::num::NonZeroUsize;

use arrow::datatypes::Schema;

use crate::data::{CurveLayout, CurvePairColumns, ResolvedLayout};
use crate::error::{FeatureError, Result};
use crate::feature::ROW_STAT_WIDTH;

/// Validate a requested thread count. Zero and negative values are rejected.
pub fn validate_thread_count(n_threads: i64) -> Result<NonZeroUsize> {
    usize::try_from(n_threads)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            FeatureError::invalid_argument(
                "n_threads",
                format!("must be a positive integer, got {n_threads}"),
            )
        })
}

/// Resolve an optional thread count, falling back to the machine's parallelism.
///
/// The default is computed on every call; there is no process-wide setting.
pub fn resolve_thread_count(n_threads: Option<i64>) -> Result<NonZeroUsize> {
    match n_threads {
        Some(n) => validate_thread_count(n),
        None => Ok(default_thread_count()),
    }
}

/// Number of threads used when the caller does not specify one.
pub fn default_thread_count() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Reject an empty depth list.
pub fn validate_depths(depths: &[f64]) -> Result<()> {
    if depths.is_empty() {
        return Err(FeatureError::invalid_argument(
            "depths",
            "depth list must contain at least one depth",
        ));
    }
    Ok(())
}

/// Bind a requested layout to the columns of `schema`.
pub(crate) fn resolve_layout(
    schema: &Schema,
    layout: CurveLayout,
    columns: &CurvePairColumns,
) -> Result<ResolvedLayout> {
    let names = columns.names();
    let found: Vec<Option<usize>> = names.iter().map(|n| schema.index_of(n).ok()).collect();
    let n_found = found.iter().flatten().count();

    let use_pair = match layout {
        CurveLayout::Pair => true,
        CurveLayout::Ordinal => false,
        CurveLayout::Auto => n_found > 0,
    };

    if use_pair {
        let mut idx = [0usize; 4];
        for (slot, (name, hit)) in idx.iter_mut().zip(names.iter().zip(&found)) {
            *slot = hit.ok_or_else(|| {
                FeatureError::schema(format!("missing required column '{name}'"))
            })?;
            require_numeric(schema, *slot)?;
        }
        return Ok(ResolvedLayout::Pair(idx));
    }

    if schema.fields().is_empty() {
        return Err(FeatureError::schema("ordinal layout needs at least one curve column"));
    }
    let cols: Vec<usize> = (0..schema.fields().len()).collect();
    for &i in &cols {
        require_numeric(schema, i)?;
    }
    Ok(ResolvedLayout::Ordinal(cols))
}

/// Check the row statistic's input: exactly four integer columns.
pub(crate) fn resolve_count_columns(schema: &Schema) -> Result<[usize; ROW_STAT_WIDTH]> {
    let n = schema.fields().len();
    if n != ROW_STAT_WIDTH {
        return Err(FeatureError::schema(format!(
            "row statistic needs exactly {ROW_STAT_WIDTH} columns, got {n}"
        )));
    }
    for (i, field) in schema.fields().iter().enumerate() {
        if !field.data_type().is_integer() {
            return Err(FeatureError::schema(format!(
                "column {i} ('{}') must be an integer type, got {}",
                field.name(),
                field.data_type()
            )));
        }
    }
    Ok([0, 1, 2, 3])
}

fn require_numeric(schema: &Schema, idx: usize) -> Result<()> {
    let field = schema.field(idx);
    if field.data_type().is_numeric() {
        Ok(())
    } else {
        Err(FeatureError::schema(format!(
            "column '{}' must be numeric, got {}",
            field.name(),
            field.data_type()
        )))
    }
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::{DataType, Field};
    use rstest::rstest;

    use super::*;

    fn schema(fields: &[(&str, DataType)]) -> Schema {
        Schema::new(
            fields
                .iter()
                .map(|(n, t)| Field::new(*n, t.clone(), true))
                .collect::<Vec<_>>(),
        )
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn rejects_non_positive_threads(#[case] n: i64) {
        let err = validate_thread_count(n).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidArgument { name: "n_threads", .. }));
    }

    #[rstest]
    #[case(1)]
    #[case(8)]
    fn accepts_positive_threads(#[case] n: i64) {
        assert_eq!(validate_thread_count(n).unwrap().get(), n as usize);
    }

    #[test]
    fn default_threads_are_resolved_per_call() {
        assert_eq!(resolve_thread_count(None).unwrap(), default_thread_count());
        assert_eq!(resolve_thread_count(Some(3)).unwrap().get(), 3);
        assert!(resolve_thread_count(Some(0)).is_err());
    }

    #[test]
    fn empty_depths_rejected() {
        assert!(matches!(
            validate_depths(&[]),
            Err(FeatureError::InvalidArgument { name: "depths", .. })
        ));
        validate_depths(&[f64::NAN]).unwrap();
    }

    #[test]
    fn auto_layout_detects_pairs() {
        let s = schema(&[
            ("v2", DataType::Float64),
            ("p1", DataType::Int32),
            ("p2", DataType::Float32),
            ("v1", DataType::Float64),
        ]);
        let layout = resolve_layout(&s, CurveLayout::Auto, &CurvePairColumns::default()).unwrap();
        assert_eq!(layout, ResolvedLayout::Pair([1, 2, 3, 0]));
    }

    #[test]
    fn auto_layout_falls_back_to_ordinal() {
        let s = schema(&[("col_0", DataType::Float64), ("col_1", DataType::Float64)]);
        let layout = resolve_layout(&s, CurveLayout::Auto, &CurvePairColumns::default()).unwrap();
        assert_eq!(layout, ResolvedLayout::Ordinal(vec![0, 1]));
    }

    #[test]
    fn partial_pair_columns_are_a_mismatch() {
        let s = schema(&[
            ("p1", DataType::Float64),
            ("p2", DataType::Float64),
            ("v1", DataType::Float64),
        ]);
        let err = resolve_layout(&s, CurveLayout::Auto, &CurvePairColumns::default()).unwrap_err();
        assert!(matches!(err, FeatureError::SchemaMismatch(ref m) if m.contains("'v2'")));
    }

    #[test]
    fn explicit_ordinal_ignores_pair_names() {
        let s = schema(&[("p1", DataType::Float64), ("x", DataType::Float64)]);
        let layout = resolve_layout(&s, CurveLayout::Ordinal, &CurvePairColumns::default()).unwrap();
        assert_eq!(layout, ResolvedLayout::Ordinal(vec![0, 1]));
    }

    #[test]
    fn non_numeric_columns_rejected() {
        let s = schema(&[("col_0", DataType::Utf8)]);
        assert!(matches!(
            resolve_layout(&s, CurveLayout::Auto, &CurvePairColumns::default()),
            Err(FeatureError::SchemaMismatch(_))
        ));
        let empty = Schema::empty();
        assert!(resolve_layout(&empty, CurveLayout::Auto, &CurvePairColumns::default()).is_err());
    }

    #[test]
    fn count_columns_need_four_integers() {
        let ok = schema(&[
            ("a", DataType::Int64),
            ("b", DataType::Int32),
            ("c", DataType::UInt16),
            ("d", DataType::Int8),
        ]);
        assert_eq!(resolve_count_columns(&ok).unwrap(), [0, 1, 2, 3]);

        let three = schema(&[("a", DataType::Int64), ("b", DataType::Int64), ("c", DataType::Int64)]);
        assert!(resolve_count_columns(&three).is_err());

        let float = schema(&[
            ("a", DataType::Int64),
            ("b", DataType::Float64),
            ("c", DataType::Int64),
            ("d", DataType::Int64),
        ]);
        assert!(matches!(
            resolve_count_columns(&float),
            Err(FeatureError::SchemaMismatch(_))
        ));
    }
}
