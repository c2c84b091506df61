use super::sink::{CellValue, RowBuffer, SinkError, TableSchema, TableSink};
use crate::core::models::ids::TableId;
use std::io::Write;

struct CsvTable<W: Write> {
    buffer: RowBuffer,
    writer: csv::Writer<W>,
    rows_written: u64,
}

/// A [`TableSink`] that streams committed rows as CSV records.
///
/// Each table writes to its own writer. The first record of every table is a
/// header with the schema's column names; every committed row follows as one
/// record, so the output never has to be held in memory.
pub struct CsvTableSink<W: Write> {
    tables: Vec<CsvTable<W>>,
}

impl<W: Write> CsvTableSink<W> {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Registers a table and writes its header line.
    ///
    /// # Arguments
    ///
    /// * `schema` - The column layout of the table.
    /// * `writer` - Destination for the table's CSV records.
    ///
    /// # Return
    ///
    /// The identifier to pass to the fill and commit calls.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Csv`] if the header cannot be written.
    pub fn create_table(&mut self, schema: TableSchema, writer: W) -> Result<TableId, SinkError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer
            .write_record(schema.column_names())
            .map_err(|e| SinkError::Csv {
                table: schema.name.clone(),
                source: e,
            })?;

        self.tables.push(CsvTable {
            buffer: RowBuffer::new(schema),
            writer,
            rows_written: 0,
        });
        Ok(TableId(self.tables.len() - 1))
    }

    pub fn rows_written(&self, table: TableId) -> Option<u64> {
        self.tables.get(table.0).map(|t| t.rows_written)
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        for table in &mut self.tables {
            table.writer.flush().map_err(|e| SinkError::Io {
                table: table.buffer.schema().name.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Flushes all tables and hands back their writers in registration order.
    pub fn into_writers(self) -> Result<Vec<W>, SinkError> {
        self.tables
            .into_iter()
            .map(|table| {
                let name = table.buffer.schema().name.clone();
                table.writer.into_inner().map_err(|e| SinkError::Io {
                    table: name,
                    source: e.into_error(),
                })
            })
            .collect()
    }

    fn table_mut(&mut self, table: TableId) -> Result<&mut CsvTable<W>, SinkError> {
        self.tables
            .get_mut(table.0)
            .ok_or(SinkError::UnknownTable(table))
    }
}

impl<W: Write> Default for CsvTableSink<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TableSink for CsvTableSink<W> {
    fn fill_int_column(
        &mut self,
        table: TableId,
        column: usize,
        value: i32,
    ) -> Result<(), SinkError> {
        self.table_mut(table)?
            .buffer
            .fill(column, CellValue::Int(value))
    }

    fn fill_real_column(
        &mut self,
        table: TableId,
        column: usize,
        value: f64,
    ) -> Result<(), SinkError> {
        self.table_mut(table)?
            .buffer
            .fill(column, CellValue::Real(value))
    }

    fn add_row(&mut self, table: TableId) -> Result<(), SinkError> {
        let table = self.table_mut(table)?;
        let row = table.buffer.take_row();
        table
            .writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(|e| SinkError::Csv {
                table: table.buffer.schema().name.clone(),
                source: e,
            })?;
        table.rows_written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_of(sink: CsvTableSink<Vec<u8>>) -> Vec<String> {
        sink.into_writers()
            .unwrap()
            .into_iter()
            .map(|bytes| String::from_utf8(bytes).unwrap())
            .collect()
    }

    #[test]
    fn create_table_writes_header() {
        let mut sink = CsvTableSink::new();
        sink.create_table(
            TableSchema::new("t").real_column("x").int_column("n"),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(output_of(sink), vec!["x,n\n".to_string()]);
    }

    #[test]
    fn committed_rows_are_written_as_records() {
        let mut sink = CsvTableSink::new();
        let table = sink
            .create_table(
                TableSchema::new("t").real_column("x").int_column("n"),
                Vec::new(),
            )
            .unwrap();

        sink.fill_real_column(table, 0, 0.25).unwrap();
        sink.fill_int_column(table, 1, -3).unwrap();
        sink.add_row(table).unwrap();
        sink.add_row(table).unwrap();

        assert_eq!(sink.rows_written(table), Some(2));
        assert_eq!(output_of(sink), vec!["x,n\n0.25,-3\n0,0\n".to_string()]);
    }

    #[test]
    fn each_table_writes_to_its_own_writer() {
        let mut sink = CsvTableSink::new();
        let a = sink
            .create_table(TableSchema::new("a").int_column("i"), Vec::new())
            .unwrap();
        let b = sink
            .create_table(TableSchema::new("b").real_column("r"), Vec::new())
            .unwrap();

        sink.fill_real_column(b, 0, 1.5).unwrap();
        sink.add_row(b).unwrap();
        sink.fill_int_column(a, 0, 8).unwrap();
        sink.add_row(a).unwrap();

        assert_eq!(
            output_of(sink),
            vec!["i\n8\n".to_string(), "r\n1.5\n".to_string()]
        );
    }

    #[test]
    fn column_errors_do_not_emit_records() {
        let mut sink = CsvTableSink::new();
        let table = sink
            .create_table(TableSchema::new("t").int_column("n"), Vec::new())
            .unwrap();

        assert!(sink.fill_real_column(table, 0, 1.0).is_err());
        assert!(sink.fill_int_column(table, 1, 1).is_err());
        assert!(matches!(
            sink.add_row(TableId(9)),
            Err(SinkError::UnknownTable(TableId(9)))
        ));
        assert_eq!(sink.rows_written(table), Some(0));
        assert_eq!(output_of(sink), vec!["n\n".to_string()]);
    }

    #[test]
    fn flush_succeeds_for_in_memory_writers() {
        let mut sink = CsvTableSink::new();
        sink.create_table(TableSchema::new("t").int_column("n"), Vec::new())
            .unwrap();
        assert!(sink.flush().is_ok());
    }
}
