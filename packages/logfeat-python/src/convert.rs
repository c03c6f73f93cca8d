//! Conversion between pyarrow objects and logfeat data.
//!
//! Batches and schemas cross the boundary through the Arrow C data interface;
//! tables are split into their record batches so batch boundaries survive.

use std::sync::Arc;

use arrow::array::{Array, RecordBatch};
use arrow::datatypes::Schema;
use arrow::pyarrow::{FromPyArrow, ToPyArrow};
use pyo3::prelude::*;
use pyo3::types::PyList;

use logfeat::Table;

use crate::error::LogfeatPyError;

/// `pyarrow.RecordBatch` to [`RecordBatch`].
pub fn batch_from_py(obj: &Bound<'_, PyAny>) -> PyResult<RecordBatch> {
    RecordBatch::from_pyarrow_bound(obj)
}

/// `pyarrow.Table` to [`Table`], one batch per table chunk.
pub fn table_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Table> {
    if !obj.hasattr("to_batches")? || !obj.hasattr("schema")? {
        return Err(LogfeatPyError::NotArrow {
            expected: "pyarrow.Table",
            got: obj.get_type().name()?.to_string(),
        }
        .into());
    }

    let schema = Schema::from_pyarrow_bound(&obj.getattr("schema")?)?;
    let batches = obj
        .call_method0("to_batches")?
        .iter()?
        .map(|item| RecordBatch::from_pyarrow_bound(&item?))
        .collect::<PyResult<Vec<_>>>()?;

    Table::try_new(Arc::new(schema), batches).map_err(|e| LogfeatPyError::from(e).into())
}

/// [`Table`] to `pyarrow.Table`, one record batch per table batch.
pub fn table_to_py(py: Python<'_>, table: Table) -> PyResult<PyObject> {
    let schema = table.schema().as_ref().to_pyarrow(py)?;
    let batches = table
        .into_batches()
        .into_iter()
        .map(|b| b.to_pyarrow(py))
        .collect::<PyResult<Vec<_>>>()?;

    let pa_table = py.import_bound("pyarrow")?.getattr("Table")?;
    let out = pa_table.call_method1("from_batches", (PyList::new_bound(py, batches), schema))?;
    Ok(out.unbind())
}

/// Arrow array to `pyarrow.Array`.
pub fn array_to_py(py: Python<'_>, array: &dyn Array) -> PyResult<PyObject> {
    array.to_data().to_pyarrow(py)
}

/// Arrow array to a single-chunk `pyarrow.ChunkedArray`.
pub fn chunked_to_py(py: Python<'_>, array: &dyn Array) -> PyResult<PyObject> {
    let chunk = array_to_py(py, array)?;
    let chunked = py
        .import_bound("pyarrow")?
        .call_method1("chunked_array", (PyList::new_bound(py, [chunk]),))?;
    Ok(chunked.unbind())
}
