//! logfeat Python bindings.
//!
//! pyarrow batches and tables in, pyarrow arrays and tables out. The GIL is
//! released while the engine runs.

use pyo3::prelude::*;

use logfeat::{BoundaryRule, CurveLayout, ExtractConfig, FeatureExtractor};

mod convert;
mod error;

use convert::{array_to_py, batch_from_py, chunked_to_py, table_from_py, table_to_py};
use error::LogfeatPyError;

/// Build an extraction config from the keyword arguments of a binding call.
///
/// Rule and layout names use the same spelling as their `FromStr` impls:
/// `"deeper_passed"` / `"nearest"` and `"auto"` / `"pair"` / `"ordinal"`.
fn build_config(
    rule: Option<&str>,
    layout: Option<&str>,
    max_threads: Option<i64>,
) -> Result<ExtractConfig, LogfeatPyError> {
    let rule = rule
        .map(str::parse::<BoundaryRule>)
        .transpose()?
        .unwrap_or_default();
    let layout = layout
        .map(str::parse::<CurveLayout>)
        .transpose()?
        .unwrap_or_default();
    let config = ExtractConfig::builder()
        .rule(rule)
        .layout(layout)
        .maybe_n_threads(max_threads)
        .build()?;
    Ok(config)
}

/// Depth feature of every row of `batch` at the first of `depths`.
///
/// Returns a `pyarrow.Array` of float64 with one value per row.
#[pyfunction]
#[pyo3(signature = (batch, depths, *, rule=None, layout=None))]
fn extract_depth_feature(
    py: Python<'_>,
    batch: &Bound<'_, PyAny>,
    depths: Vec<f64>,
    rule: Option<&str>,
    layout: Option<&str>,
) -> PyResult<PyObject> {
    let extractor = FeatureExtractor::new(build_config(rule, layout, None)?);
    let batch = batch_from_py(batch)?;
    let out = py
        .allow_threads(|| extractor.extract_batch(&batch, &depths))
        .map_err(LogfeatPyError::from)?;
    array_to_py(py, &out)
}

/// One feature column per depth across `table`, on up to `max_threads`
/// workers (all cores when `None`).
#[pyfunction]
#[pyo3(signature = (table, depths, max_threads=None, *, rule=None, layout=None))]
fn extract_depth_feature_from_arrow_table(
    py: Python<'_>,
    table: &Bound<'_, PyAny>,
    depths: Vec<f64>,
    max_threads: Option<i64>,
    rule: Option<&str>,
    layout: Option<&str>,
) -> PyResult<PyObject> {
    let extractor = FeatureExtractor::new(build_config(rule, layout, max_threads)?);
    let table = table_from_py(table)?;
    let out = py
        .allow_threads(|| extractor.extract_table(&table, &depths))
        .map_err(LogfeatPyError::from)?;
    table_to_py(py, out)
}

/// Count of positive odd values in each row of a four-integer-column batch.
///
/// Returns a single-chunk `pyarrow.ChunkedArray` of int64.
#[pyfunction]
fn process_record_batch(py: Python<'_>, batch: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    let batch = batch_from_py(batch)?;
    let out = py
        .allow_threads(|| logfeat::count_row_feature(&batch))
        .map_err(LogfeatPyError::from)?;
    chunked_to_py(py, &out)
}

/// Row statistic across `table`, as a one-column `count` table.
#[pyfunction]
#[pyo3(signature = (table, max_threads=None))]
fn count_positive_odd_from_arrow_table(
    py: Python<'_>,
    table: &Bound<'_, PyAny>,
    max_threads: Option<i64>,
) -> PyResult<PyObject> {
    let extractor = FeatureExtractor::new(build_config(None, None, max_threads)?);
    let table = table_from_py(table)?;
    let out = py
        .allow_threads(|| extractor.count_table(&table))
        .map_err(LogfeatPyError::from)?;
    table_to_py(py, out)
}

/// Module initialization.
#[pymodule]
fn _logfeat(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    error::register(m)?;
    m.add_function(wrap_pyfunction!(extract_depth_feature, m)?)?;
    m.add_function(wrap_pyfunction!(extract_depth_feature_from_arrow_table, m)?)?;
    m.add_function(wrap_pyfunction!(process_record_batch, m)?)?;
    m.add_function(wrap_pyfunction!(count_positive_odd_from_arrow_table, m)?)?;
    Ok(())
}
