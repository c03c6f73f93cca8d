//! Arrow IPC (Feather v2) tables.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::FileWriter;

use super::error::LoadError;
use crate::data::Table;

/// Load an Arrow IPC file into a [`Table`], one batch per file batch.
pub fn read_ipc_table(path: impl AsRef<Path>) -> Result<Table, LoadError> {
    let file = File::open(path.as_ref())?;
    let reader = FileReader::try_new(BufReader::new(file), None)?;
    let schema = reader.schema();
    let batches: Result<Vec<_>, _> = reader.collect();
    Ok(Table::try_new(schema, batches?)?)
}

/// Write `table` to an Arrow IPC file, one file batch per table batch.
pub fn write_ipc_table(path: impl AsRef<Path>, table: &Table) -> Result<(), LoadError> {
    let file = File::create(path.as_ref())?;
    let mut writer = FileWriter::try_new(BufWriter::new(file), table.schema())?;
    for batch in table.batches() {
        writer.write(batch)?;
    }
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;
    use crate::testing::ordinal_curve_table;

    #[test]
    fn round_trip_keeps_batches() {
        let table = ordinal_curve_table(3, 17, 4, 11);
        let file = NamedTempFile::new().unwrap();

        write_ipc_table(file.path(), &table).unwrap();
        let loaded = read_ipc_table(file.path()).unwrap();

        assert_eq!(loaded.row_counts(), vec![17, 17, 17]);
        assert_eq!(loaded.batches(), table.batches());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_ipc_table("/nonexistent/logfeat/table.arrow").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
