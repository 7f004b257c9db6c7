use crate::errors::DataLoadError;
use csv::ReaderBuilder as CsvReaderBuilder;
use indexmap::IndexMap;
use std::io::Read;

/// The raw source table: one record per simulated hour, one wide column per
/// building field. Reading the table is the only I/O the engine performs;
/// everything downstream is a pure transform over these records.
#[derive(Clone, Debug)]
pub struct RawTable {
    columns: IndexMap<String, usize>,
    records: Vec<csv::StringRecord>,
}

/// Reads and buffers the whole source. Fails without publishing anything if
/// the source cannot be read or parsed, or if it holds no data rows.
pub fn read_raw_table(source: impl Read) -> Result<RawTable, DataLoadError> {
    let mut reader = CsvReaderBuilder::new().flexible(true).from_reader(source);

    let columns = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(position, name)| (name.trim().to_string(), position))
        .collect::<IndexMap<_, _>>();

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(DataLoadError::Read)?;
    if records.is_empty() {
        return Err(DataLoadError::EmptyDataset);
    }

    Ok(RawTable { columns, records })
}

impl RawTable {
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(move |(idx, record)| RawRow {
                table: self,
                record,
                position: idx + 1,
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A view over one record with numeric auto-typing by column name.
#[derive(Clone, Copy)]
pub struct RawRow<'a> {
    table: &'a RawTable,
    record: &'a csv::StringRecord,
    position: usize,
}

impl RawRow<'_> {
    /// 1-based position of this row in the source, excluding the header.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The numeric value of the named column. `None` when the column is not
    /// in the header, the cell is empty, or the cell does not parse as a
    /// number; whether that is defaulted or fatal is the transformer's call.
    pub fn get(&self, column: &str) -> Option<f64> {
        let cell = self.record.get(*self.table.columns.get(column)?)?.trim();
        if cell.is_empty() {
            None
        } else {
            cell.parse().ok()
        }
    }
}
